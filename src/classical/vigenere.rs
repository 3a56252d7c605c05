//! Vigenère polyalphabetic cipher.
//!
//! Both the message and the keyword are normalized before use: every
//! non-letter is stripped and the rest uppercased. This is lossy on purpose —
//! punctuation, spacing and original case are unrecoverable. What round-trips
//! is the normalized text, not the raw input.

use crate::error::{CipherError, Result};

/// Strips non-letters and uppercases. Idempotent.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VigenereCipher {
    keyword: Vec<u8>,
}

impl VigenereCipher {
    pub fn new(keyword: &str) -> Result<Self> {
        let keyword = normalize(keyword).into_bytes();
        if keyword.is_empty() {
            return Err(CipherError::KeySchedule(
                "vigenere keyword contains no letters".into(),
            ));
        }
        Ok(Self { keyword })
    }

    pub fn encrypt(&self, text: &str) -> String {
        self.transform(text, |plain, key| (plain + key) % 26)
    }

    pub fn decrypt(&self, text: &str) -> String {
        self.transform(text, |cipher, key| (cipher + 26 - key) % 26)
    }

    fn transform(&self, text: &str, combine: impl Fn(u8, u8) -> u8) -> String {
        normalize(text)
            .bytes()
            .enumerate()
            .map(|(i, c)| {
                let key = self.keyword[i % self.keyword.len()] - b'A';
                (combine(c - b'A', key) + b'A') as char
            })
            .collect()
    }
}

#[test]
fn known_keyword_vector() {
    let cipher = VigenereCipher::new("KEY").unwrap();
    assert_eq!(cipher.encrypt("HELLOWORLD"), "RIJVSUYVJN");
    assert_eq!(cipher.decrypt("RIJVSUYVJN"), "HELLOWORLD");
}

#[test]
fn round_trips_normalized_text() {
    let cipher = VigenereCipher::new("thisisasamplekey").unwrap();
    let message = "Hello. This message is encrypted.";
    let encrypted = cipher.encrypt(message);
    assert_eq!(cipher.decrypt(&encrypted), normalize(message));
}

#[test]
fn normalization_is_idempotent_and_lossy() {
    let raw = "He said: 42 things, loudly!";
    let once = normalize(raw);
    assert_eq!(normalize(&once), once);
    assert_eq!(once, "HESAIDTHINGSLOUDLY");
}

#[test]
fn letterless_keyword_is_rejected() {
    assert!(matches!(
        VigenereCipher::new("123 !?"),
        Err(CipherError::KeySchedule(_))
    ));
}
