//! Crate-wide error taxonomy.
//!
//! Key-schedule failures are construction-time and fatal to registry setup;
//! everything else is recoverable per call — the caller drops the offending
//! message and the suite keeps serving.

use thiserror::Error;

use crate::registry::{AlgorithmId, UserClass};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The numeric identifier does not name any algorithm in the suite.
    #[error("invalid encryption algorithm identifier {0}")]
    InvalidAlgorithm(u8),

    /// The algorithm exists but is not in the caller's permitted set.
    #[error("{class:?} users are not authorized to use {algorithm:?}")]
    Unauthorized {
        class: UserClass,
        algorithm: AlgorithmId,
    },

    /// An engine could not derive usable key material at construction.
    #[error("key schedule failure: {0}")]
    KeySchedule(String),

    /// A transform precondition was violated for an otherwise valid engine.
    #[error("encoding failure: {0}")]
    Encoding(String),

    /// The stored ciphertext has a shape the tagged algorithm cannot parse.
    #[error("corrupt ciphertext: {0}")]
    CorruptCiphertext(String),
}

pub type Result<T> = std::result::Result<T, CipherError>;

#[test]
fn display_names_the_class_and_algorithm() {
    let err = CipherError::Unauthorized {
        class: UserClass::Classical,
        algorithm: AlgorithmId::Rsa,
    };
    assert_eq!(
        err.to_string(),
        "Classical users are not authorized to use Rsa"
    );
}
