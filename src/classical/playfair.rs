//! Playfair digraph cipher over a 5×5 key square.
//!
//! The square is built once from a keyword: normalize, merge J into I,
//! deduplicate, then append whatever remains of the 25-letter alphabet.
//! Filler letters inserted while pairing are an accepted, irreversible
//! artifact — decryption returns the padded text, not the raw original.

use ndarray::Array2;

use crate::classical::vigenere::normalize;
use crate::error::{CipherError, Result};

const SQUARE_ALPHABET: &[u8; 25] = b"ABCDEFGHIKLMNOPQRSTUVWXYZ";
const FILLER: u8 = b'X';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfairCipher {
    square: Array2<u8>,
}

impl PlayfairCipher {
    pub fn new(keyword: &str) -> Result<Self> {
        let keyword = merge_j(&normalize(keyword));
        if keyword.is_empty() {
            return Err(CipherError::KeySchedule(
                "playfair keyword contains no letters".into(),
            ));
        }
        let mut cells: Vec<u8> = Vec::with_capacity(25);
        for letter in keyword.as_bytes().iter().chain(SQUARE_ALPHABET.iter()) {
            if !cells.contains(letter) {
                cells.push(*letter);
            }
        }
        let square = Array2::from_shape_vec((5, 5), cells)
            .map_err(|e| CipherError::KeySchedule(format!("playfair key square: {e}")))?;
        Ok(Self { square })
    }

    /// The key square rows, top to bottom.
    pub fn rows(&self) -> Vec<String> {
        self.square
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&c| c as char).collect())
            .collect()
    }

    pub fn encrypt(&self, text: &str) -> String {
        let digraphs = prepare_digraphs(&merge_j(&normalize(text)));
        let mut out = String::with_capacity(digraphs.len() * 2);
        for [a, b] in digraphs {
            let (x, y) = self.transform_pair(a, b, 1);
            out.push(x as char);
            out.push(y as char);
        }
        out
    }

    pub fn decrypt(&self, text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(bytes.len());
        for pair in bytes.chunks_exact(2) {
            let (x, y) = self.transform_pair(pair[0], pair[1], 4);
            out.push(x as char);
            out.push(y as char);
        }
        out
    }

    /// Rectangle rule: same row shifts both columns, same column shifts both
    /// rows, otherwise the columns swap. `shift` is +1 for encryption and
    /// +4 (≡ −1 mod 5) for decryption.
    fn transform_pair(&self, a: u8, b: u8, shift: usize) -> (u8, u8) {
        let (r1, c1) = self.position(a);
        let (r2, c2) = self.position(b);
        let (p1, p2) = if r1 == r2 {
            ((r1, (c1 + shift) % 5), (r2, (c2 + shift) % 5))
        } else if c1 == c2 {
            (((r1 + shift) % 5, c1), ((r2 + shift) % 5, c2))
        } else {
            ((r1, c2), (r2, c1))
        };
        (self.square[p1], self.square[p2])
    }

    fn position(&self, letter: u8) -> (usize, usize) {
        self.square
            .indexed_iter()
            .find(|(_, &cell)| cell == letter)
            .map(|(index, _)| index)
            .unwrap_or((0, 0))
    }
}

fn merge_j(text: &str) -> String {
    text.replace('J', "I")
}

/// Splits normalized text into digraphs, inserting a filler between the two
/// letters of an equal pair. Each insertion shifts every later pairing, so
/// the scan re-checks positions against the grown text rather than walking
/// the original once. An incomplete final digraph gets a trailing filler.
fn prepare_digraphs(text: &str) -> Vec<[u8; 2]> {
    let mut text = text.as_bytes().to_vec();
    let mut pair_count = text.len() / 2 + text.len() % 2;
    let mut i = 0;
    while i + 1 < pair_count {
        if text[2 * i] == text[2 * i + 1] {
            text.insert(2 * i + 1, FILLER);
            pair_count = text.len() / 2 + text.len() % 2;
        }
        i += 1;
    }
    if text.len() % 2 == 1 {
        text.push(FILLER);
    }
    text.chunks_exact(2).map(|p| [p[0], p[1]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monarchy_key_square_layout() {
        let cipher = PlayfairCipher::new("MONARCHY").unwrap();
        assert_eq!(cipher.rows(), ["MONAR", "CHYBD", "EFGIK", "LPQST", "UVWXZ"]);
    }

    #[test]
    fn monarchy_digraph_vector() {
        let cipher = PlayfairCipher::new("MONARCHY").unwrap();
        assert_eq!(cipher.encrypt("HS"), "BP");
        assert_eq!(cipher.decrypt("BP"), "HS");
    }

    #[test]
    fn instruments_with_trailing_filler() {
        let cipher = PlayfairCipher::new("MONARCHY").unwrap();
        let encrypted = cipher.encrypt("instruments");
        assert_eq!(encrypted, "GATLMZCLRQXA");
        // the trailing filler survives decryption
        assert_eq!(cipher.decrypt(&encrypted), "INSTRUMENTSX");
    }

    #[test]
    fn equal_pair_gets_filler_and_rescan() {
        assert_eq!(
            prepare_digraphs("BALLOON"),
            vec![*b"BA", *b"LX", *b"LO", *b"ON"]
        );
    }

    #[test]
    fn filler_free_text_round_trips() {
        let cipher = PlayfairCipher::new("thisisasamplekey").unwrap();
        let encrypted = cipher.encrypt("THEWEATHERISFINE");
        // even length, no repeated pair letters: the raw text comes back
        assert_eq!(cipher.decrypt(&encrypted), "THEWEATHERISFINE");
    }

    #[test]
    fn j_merges_into_i() {
        let cipher = PlayfairCipher::new("JUDGE").unwrap();
        assert_eq!(cipher.rows()[0], "IUDGE");
        assert_eq!(cipher.encrypt("JAM"), cipher.encrypt("IAM"));
    }
}
