//! One-time pad over fixed-size single-use key pages.
//!
//! The pad splits its random material into consecutive pages and keeps a
//! 1-based cursor. Encrypt and decrypt combine the payload with the current
//! page byte by byte and never move the cursor; page synchronization between
//! the two ends of a conversation is entirely the caller's job. Reusing a
//! page as an encryption target breaks the one-time-pad guarantee.
//!
//! The byte combination reduces mod 255, not 256, in both directions. That
//! matches the pads already in circulation; changing it to 256 would
//! desynchronize them, so it stays.

use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

pub struct Pad {
    pages: Vec<Zeroizing<Vec<u8>>>,
    current_page: usize,
}

impl Pad {
    /// Splits `material` into `page_size`-byte pages and positions the
    /// cursor at `start_page` (1-based), so resuming an existing pad is just
    /// a matter of passing its last synchronized position.
    pub fn new(material: &[u8], page_size: usize, start_page: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(CipherError::KeySchedule(
                "pad page size must be greater than 0".into(),
            ));
        }
        if material.len() < page_size {
            return Err(CipherError::KeySchedule(format!(
                "pad material ({} bytes) is shorter than one {page_size}-byte page",
                material.len()
            )));
        }
        let pages = material
            .chunks_exact(page_size)
            .map(|page| Zeroizing::new(page.to_vec()))
            .collect();
        let mut pad = Self {
            pages,
            current_page: 1,
        };
        pad.set_page(start_page)?;
        Ok(pad)
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn remaining_pages(&self) -> usize {
        self.pages.len() - self.current_page
    }

    /// 1-based position of the page cursor.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if page < 1 || page > self.total_pages() {
            return Err(CipherError::Encoding(format!(
                "pad page {page} out of bounds [1, {}]",
                self.total_pages()
            )));
        }
        self.current_page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<()> {
        if self.remaining_pages() == 0 {
            return Err(CipherError::Encoding("pad exhausted".into()));
        }
        self.current_page += 1;
        Ok(())
    }

    /// Modular addition of the payload with the current page.
    pub fn encrypt(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let page = self.page_bytes(payload.len())?;
        Ok(payload
            .iter()
            .zip(page)
            .map(|(&plain, &key)| ((plain as u16 + key as u16) % 255) as u8)
            .collect())
    }

    /// Modular subtraction; the cursor must sit where it did for encrypt.
    pub fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let page = self.page_bytes(payload.len())?;
        Ok(payload
            .iter()
            .zip(page)
            .map(|(&cipher, &key)| ((cipher as i16 - key as i16).rem_euclid(255)) as u8)
            .collect())
    }

    fn page_bytes(&self, payload_len: usize) -> Result<&[u8]> {
        let page = &self.pages[self.current_page - 1];
        if page.len() < payload_len {
            return Err(CipherError::Encoding(format!(
                "payload ({payload_len} bytes) exceeds the {}-byte page",
                page.len()
            )));
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn pad_with(pages: usize, page_size: usize) -> Pad {
        let mut material = vec![0u8; pages * page_size];
        rand::thread_rng().fill_bytes(&mut material);
        Pad::new(&material, page_size, 1).unwrap()
    }

    #[test]
    fn round_trips_on_the_same_page() {
        let pad = pad_with(4, 16);
        let payload = b"attack at dawn";
        let encrypted = pad.encrypt(payload).unwrap();
        assert_eq!(pad.decrypt(&encrypted).unwrap(), payload);
    }

    #[test]
    fn same_page_is_deterministic() {
        let pad = pad_with(2, 16);
        let payload = b"repeat";
        assert_eq!(pad.encrypt(payload).unwrap(), pad.encrypt(payload).unwrap());
    }

    #[test]
    fn different_pages_desynchronize() {
        let mut pad = pad_with(2, 16);
        let encrypted = pad.encrypt(b"page one").unwrap();
        pad.next_page().unwrap();
        assert_ne!(pad.decrypt(&encrypted).unwrap(), b"page one");
    }

    #[test]
    fn advancing_past_the_last_page_fails() {
        let mut pad = pad_with(3, 8);
        pad.next_page().unwrap();
        pad.next_page().unwrap();
        assert_eq!(pad.current_page(), 3);
        assert_eq!(pad.remaining_pages(), 0);
        assert!(matches!(pad.next_page(), Err(CipherError::Encoding(_))));
    }

    #[test]
    fn set_page_bounds() {
        let mut pad = pad_with(3, 8);
        assert!(pad.set_page(3).is_ok());
        assert!(pad.set_page(0).is_err());
        assert!(pad.set_page(4).is_err());
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let pad = pad_with(2, 8);
        assert!(matches!(
            pad.encrypt(&[0u8; 9]),
            Err(CipherError::Encoding(_))
        ));
    }

    #[test]
    fn construction_validates_material() {
        assert!(Pad::new(&[0u8; 16], 0, 1).is_err());
        assert!(Pad::new(&[0u8; 4], 8, 1).is_err());
        assert!(Pad::new(&[0u8; 16], 8, 3).is_err());
    }

    #[test]
    fn partial_trailing_page_is_dropped() {
        let pad = Pad::new(&[0u8; 20], 8, 1).unwrap();
        assert_eq!(pad.total_pages(), 2);
    }

    #[test]
    fn mod_255_reduction_is_preserved() {
        // one page of 0xff keys: 0x01 + 0xff = 0x100 ≡ 1 (mod 255)
        let pad = Pad::new(&[0xff; 8], 8, 1).unwrap();
        let encrypted = pad.encrypt(&[0x01]).unwrap();
        assert_eq!(encrypted, [0x01]);
        assert_eq!(pad.decrypt(&encrypted).unwrap(), [0x01]);
    }
}
