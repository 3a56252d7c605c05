//! Algorithm identifiers, the per-class authorization policy and the
//! registry that owns one live instance of every engine.
//!
//! The registry presents a uniform bytes-in/bytes-out contract. Classical
//! engines validate UTF-8 internally; Blowfish transforms exactly one
//! 8-byte block (no chaining mode lives here); RSA ciphertext is the
//! big-endian 8-byte encoding of each per-byte integer. The one-time pad is
//! the only engine with mutable state, so it alone sits behind a mutex.

use std::sync::{Mutex, PoisonError};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::asymmetric::rsa::RsaKeyPair;
use crate::classical::caesar::CaesarCipher;
use crate::classical::playfair::PlayfairCipher;
use crate::classical::vigenere::VigenereCipher;
use crate::config::SuiteConfig;
use crate::error::{CipherError, Result};
use crate::symmetric::blowfish::{Blowfish, BLOCK_SIZE};
use crate::symmetric::one_time_pad::Pad;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmId {
    Rsa,
    Caesar,
    CaesarPermuted,
    Playfair,
    Vigenere,
    Blowfish,
    OneTimePad,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 7] = [
        AlgorithmId::Rsa,
        AlgorithmId::Caesar,
        AlgorithmId::CaesarPermuted,
        AlgorithmId::Playfair,
        AlgorithmId::Vigenere,
        AlgorithmId::Blowfish,
        AlgorithmId::OneTimePad,
    ];
}

impl TryFrom<u8> for AlgorithmId {
    type Error = CipherError;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(CipherError::InvalidAlgorithm(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserClass {
    Classical,
    Asymmetric,
    Symmetric,
}

impl UserClass {
    /// The permitted sets partition [`AlgorithmId::ALL`]: every algorithm
    /// belongs to exactly one class.
    pub fn permitted_algorithms(self) -> &'static [AlgorithmId] {
        match self {
            UserClass::Classical => &[
                AlgorithmId::Caesar,
                AlgorithmId::CaesarPermuted,
                AlgorithmId::Playfair,
                AlgorithmId::Vigenere,
            ],
            UserClass::Asymmetric => &[AlgorithmId::Rsa],
            UserClass::Symmetric => &[AlgorithmId::Blowfish, AlgorithmId::OneTimePad],
        }
    }
}

/// Validates a requested algorithm against the caller's class before any
/// engine is touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchPolicy;

impl DispatchPolicy {
    pub fn authorize(self, class: UserClass, algorithm: AlgorithmId) -> Result<()> {
        if class.permitted_algorithms().contains(&algorithm) {
            Ok(())
        } else {
            warn!(?class, ?algorithm, "algorithm not permitted for class");
            Err(CipherError::Unauthorized { class, algorithm })
        }
    }
}

/// One live instance of every engine, built once at startup and shared for
/// the life of the process. Every engine except the pad is immutable after
/// its key schedule runs.
pub struct AlgorithmRegistry {
    caesar: CaesarCipher,
    caesar_permuted: CaesarCipher,
    vigenere: VigenereCipher,
    playfair: PlayfairCipher,
    blowfish: Blowfish,
    pad: Mutex<Pad>,
    rsa: RsaKeyPair,
}

impl AlgorithmRegistry {
    /// Runs every engine's key schedule. Any failure aborts construction;
    /// a partially initialized registry never serves requests.
    pub fn from_config(config: &SuiteConfig, rng: &mut impl Rng) -> Result<Self> {
        let registry = Self {
            caesar: CaesarCipher::new(config.caesar_shift),
            caesar_permuted: CaesarCipher::permuted(config.caesar_permuted_shift, rng),
            vigenere: VigenereCipher::new(&config.vigenere_keyword)?,
            playfair: PlayfairCipher::new(&config.playfair_keyword)?,
            blowfish: Blowfish::new(&config.blowfish_key)?,
            pad: Mutex::new(Pad::new(
                &config.pad_material,
                config.pad_page_size,
                config.pad_start_page,
            )?),
            rsa: RsaKeyPair::generate(rng)?,
        };
        info!(
            rsa_modulus = registry.rsa.modulus(),
            pad_pages = registry.pad_position().1,
            "algorithm registry initialized"
        );
        Ok(registry)
    }

    pub fn encrypt(&self, algorithm: AlgorithmId, plaintext: &[u8]) -> Result<Vec<u8>> {
        debug!(?algorithm, len = plaintext.len(), "encrypt");
        match algorithm {
            AlgorithmId::Rsa => Ok(encode_residues(&self.rsa.encrypt(plaintext))),
            AlgorithmId::Caesar => Ok(self.caesar.encrypt(text_payload(plaintext)?).into_bytes()),
            AlgorithmId::CaesarPermuted => {
                Ok(self.caesar_permuted.encrypt(text_payload(plaintext)?).into_bytes())
            }
            AlgorithmId::Playfair => Ok(self.playfair.encrypt(text_payload(plaintext)?).into_bytes()),
            AlgorithmId::Vigenere => Ok(self.vigenere.encrypt(text_payload(plaintext)?).into_bytes()),
            AlgorithmId::Blowfish => Ok(self.blowfish.encrypt_block(&single_block(plaintext)?).to_vec()),
            AlgorithmId::OneTimePad => self.lock_pad().encrypt(plaintext),
        }
    }

    pub fn decrypt(&self, algorithm: AlgorithmId, ciphertext: &[u8]) -> Result<Vec<u8>> {
        debug!(?algorithm, len = ciphertext.len(), "decrypt");
        match algorithm {
            AlgorithmId::Rsa => self.rsa.decrypt(&decode_residues(ciphertext)?),
            AlgorithmId::Caesar => Ok(self.caesar.decrypt(stored_text(ciphertext)?).into_bytes()),
            AlgorithmId::CaesarPermuted => {
                Ok(self.caesar_permuted.decrypt(stored_text(ciphertext)?).into_bytes())
            }
            AlgorithmId::Playfair => Ok(self.playfair.decrypt(stored_text(ciphertext)?).into_bytes()),
            AlgorithmId::Vigenere => Ok(self.vigenere.decrypt(stored_text(ciphertext)?).into_bytes()),
            AlgorithmId::Blowfish => {
                let block = ciphertext.try_into().map_err(|_| {
                    CipherError::CorruptCiphertext(format!(
                        "blowfish ciphertext must be exactly {BLOCK_SIZE} bytes, got {}",
                        ciphertext.len()
                    ))
                })?;
                Ok(self.blowfish.decrypt_block(&block).to_vec())
            }
            AlgorithmId::OneTimePad => self.lock_pad().decrypt(ciphertext),
        }
    }

    /// Moves the shared pad cursor to the next page.
    pub fn advance_pad_page(&self) -> Result<()> {
        self.lock_pad().next_page()
    }

    /// Jumps the shared pad cursor, e.g. to resynchronize with a peer.
    pub fn set_pad_page(&self, page: usize) -> Result<()> {
        self.lock_pad().set_page(page)
    }

    /// Current and total page count of the shared pad.
    pub fn pad_position(&self) -> (usize, usize) {
        let pad = self.lock_pad();
        (pad.current_page(), pad.total_pages())
    }

    fn lock_pad(&self) -> std::sync::MutexGuard<'_, Pad> {
        // a poisoned lock still holds a structurally valid pad
        self.pad.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Classical engines work on text; the byte contract requires valid UTF-8.
fn text_payload(payload: &[u8]) -> Result<&str> {
    std::str::from_utf8(payload)
        .map_err(|e| CipherError::Encoding(format!("payload is not valid UTF-8: {e}")))
}

fn stored_text(ciphertext: &[u8]) -> Result<&str> {
    std::str::from_utf8(ciphertext)
        .map_err(|e| CipherError::CorruptCiphertext(format!("ciphertext is not valid UTF-8: {e}")))
}

fn single_block(payload: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    payload.try_into().map_err(|_| {
        CipherError::Encoding(format!(
            "blowfish transforms single {BLOCK_SIZE}-byte blocks, got {} bytes",
            payload.len()
        ))
    })
}

fn encode_residues(residues: &[u64]) -> Vec<u8> {
    residues.iter().flat_map(|r| r.to_be_bytes()).collect()
}

fn decode_residues(ciphertext: &[u8]) -> Result<Vec<u64>> {
    if ciphertext.len() % 8 != 0 {
        return Err(CipherError::CorruptCiphertext(format!(
            "rsa ciphertext length {} is not a multiple of 8",
            ciphertext.len()
        )));
    }
    Ok(ciphertext
        .chunks_exact(8)
        .map(|chunk| u64::from_be_bytes([
            chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
        ]))
        .collect())
}
