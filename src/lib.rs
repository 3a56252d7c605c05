//! A small cipher-engine suite behind a per-user authorization policy.
//!
//! Seven engines live here: four classical text ciphers (Caesar, Caesar over
//! a permuted alphabet, Vigenère, Playfair), a Blowfish block cipher, a
//! one-time pad and a toy RSA engine. [`registry::AlgorithmRegistry`] owns
//! one instance of each, built once from a [`config::SuiteConfig`];
//! [`registry::DispatchPolicy`] decides which algorithms a user class may
//! invoke, and [`codec::MessageCodec`] runs authorize → dispatch → tag.
//!
//! None of this is production cryptography. The RSA engine draws its primes
//! from a tiny fixed table and the classical ciphers are classroom material;
//! the point of the crate is the engines' exact, reversible behavior, not
//! their strength.

pub mod classical {
    pub mod caesar;
    pub mod playfair;
    pub mod vigenere;
}

pub mod symmetric {
    pub mod blowfish;
    pub mod one_time_pad;
}

pub mod asymmetric {
    pub mod rsa;
}

pub mod codec;
pub mod config;
pub mod error;
pub mod registry;

pub use codec::{EncryptedMessage, MessageCodec};
pub use config::SuiteConfig;
pub use error::CipherError;
pub use registry::{AlgorithmId, AlgorithmRegistry, DispatchPolicy, UserClass};
