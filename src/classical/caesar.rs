//! Caesar shift cipher over a configurable 26-letter target alphabet.
//!
//! With the identity alphabet this is the textbook rotation. With a shuffled
//! alphabet the substitution is no longer a rotation, so decryption has to
//! find each letter's position inside the permuted alphabet before undoing
//! the shift — the permutation covers all 26 letters, so the lookup is total.

use rand::seq::SliceRandom;
use rand::Rng;

const PLAIN_ALPHABET: [u8; 26] = *b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaesarCipher {
    shift: i32,
    alphabet: [u8; 26],
}

impl CaesarCipher {
    pub fn new(shift: i32) -> Self {
        Self {
            shift,
            alphabet: PLAIN_ALPHABET,
        }
    }

    /// Caesar variant substituting into a randomly permuted alphabet.
    pub fn permuted(shift: i32, rng: &mut impl Rng) -> Self {
        let mut alphabet = PLAIN_ALPHABET;
        alphabet.shuffle(rng);
        Self { shift, alphabet }
    }

    /// The uppercase target alphabet, mostly useful for logging a demo setup.
    pub fn alphabet(&self) -> &[u8; 26] {
        &self.alphabet
    }

    /// Shifts every ASCII letter by the key into the target alphabet,
    /// preserving case; all other characters pass through unchanged.
    pub fn encrypt(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                'A'..='Z' => self.substitute(c as u8 - b'A') as char,
                'a'..='z' => self.substitute(c as u8 - b'a').to_ascii_lowercase() as char,
                other => other,
            })
            .collect()
    }

    /// Inverse of [`encrypt`](Self::encrypt) for the same shift and alphabet.
    pub fn decrypt(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                'A'..='Z' => self.invert(c as u8),
                'a'..='z' => self.invert(c.to_ascii_uppercase() as u8).to_ascii_lowercase(),
                other => other,
            })
            .collect()
    }

    fn substitute(&self, letter_index: u8) -> u8 {
        let index = (letter_index as i32 + self.shift).rem_euclid(26);
        self.alphabet[index as usize]
    }

    fn invert(&self, cipher_letter: u8) -> char {
        // Position inside the (possibly permuted) alphabet, then shift back.
        let position = self
            .alphabet
            .iter()
            .position(|&a| a == cipher_letter)
            .unwrap_or(0) as i32;
        let index = (position - self.shift).rem_euclid(26);
        (b'A' + index as u8) as char
    }
}

#[test]
fn plain_caesar_shifts_and_preserves_case() {
    let cipher = CaesarCipher::new(4);
    assert_eq!(cipher.encrypt("Hello, World!"), "Lipps, Asvph!");
    assert_eq!(cipher.decrypt("Lipps, Asvph!"), "Hello, World!");
}

#[test]
fn round_trips_for_every_shift() {
    let text = "The quick brown Fox, jumps over 13 lazy dogs!";
    for shift in -30..=55 {
        let cipher = CaesarCipher::new(shift);
        assert_eq!(cipher.decrypt(&cipher.encrypt(text)), text, "shift {shift}");
    }
}

#[test]
fn permuted_alphabet_substitutes_by_position() {
    let cipher = CaesarCipher {
        shift: 0,
        alphabet: *b"QWERTYUIOPASDFGHJKLZXCVBNM",
    };
    assert_eq!(cipher.encrypt("ATTACKATONCE"), "QZZQEAQZGFET");
    assert_eq!(cipher.decrypt("QZZQEAQZGFET"), "ATTACKATONCE");
}

#[test]
fn permuted_round_trips_for_nonzero_shifts() {
    let mut rng = rand::thread_rng();
    let text = "Attack at Once";
    for shift in 0..26 {
        let cipher = CaesarCipher::permuted(shift, &mut rng);
        assert_eq!(cipher.decrypt(&cipher.encrypt(text)), text, "shift {shift}");
    }
}
