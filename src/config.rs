//! Startup key material for every engine in the suite.
//!
//! The registry consumes one of these exactly once, at construction. A
//! config that fails any engine's key schedule aborts registry construction
//! — there is no partially configured suite.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub caesar_shift: i32,
    pub caesar_permuted_shift: i32,
    pub vigenere_keyword: String,
    pub playfair_keyword: String,
    pub blowfish_key: Vec<u8>,
    /// Random material the pad is sliced from.
    pub pad_material: Vec<u8>,
    pub pad_page_size: usize,
    /// 1-based page the pad cursor starts on.
    pub pad_start_page: usize,
}

impl SuiteConfig {
    /// The demo deployment: fixed classical keys, the well-worn 8-byte
    /// Blowfish sample key and a freshly drawn 2048-page pad.
    pub fn demo(rng: &mut impl Rng) -> Self {
        let mut pad_material = vec![0u8; 16 * 2048];
        rng.fill(pad_material.as_mut_slice());
        Self {
            caesar_shift: 4,
            caesar_permuted_shift: 0,
            vigenere_keyword: "thisisasamplekey".into(),
            playfair_keyword: "thisisasamplekey".into(),
            blowfish_key: vec![0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF],
            pad_material,
            pad_page_size: 16,
            pad_start_page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_config_is_fully_populated() {
        let config = SuiteConfig::demo(&mut rand::thread_rng());
        assert_eq!(config.blowfish_key.len(), 8);
        assert_eq!(config.pad_material.len(), 16 * 2048);
        assert_eq!(config.pad_material.len() / config.pad_page_size, 2048);
        assert!(!config.vigenere_keyword.is_empty());
    }
}
