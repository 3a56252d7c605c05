//! Message-level orchestration: authorize, dispatch, tag.
//!
//! The codec is the only entry point that combines the policy with the
//! registry. Authorization runs first, so an unauthorized caller learns
//! nothing about cipher-level preconditions; a cipher failure is surfaced
//! as-is, never papered over by retrying a different algorithm.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::registry::{AlgorithmId, AlgorithmRegistry, DispatchPolicy, UserClass};

/// A ciphertext tagged with the algorithm that produced it. Immutable once
/// created; decryption requires re-invoking the same algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    pub id: Uuid,
    pub ciphertext: Vec<u8>,
    pub algorithm: AlgorithmId,
    pub author: String,
}

pub struct MessageCodec<'r> {
    registry: &'r AlgorithmRegistry,
    policy: DispatchPolicy,
}

impl<'r> MessageCodec<'r> {
    pub fn new(registry: &'r AlgorithmRegistry) -> Self {
        Self {
            registry,
            policy: DispatchPolicy,
        }
    }

    /// Authorize → encrypt → tag. Authorization failures take precedence
    /// over cipher failures because nothing is dispatched without them.
    pub fn encrypt(
        &self,
        class: UserClass,
        algorithm: AlgorithmId,
        author: &str,
        plaintext: &[u8],
    ) -> Result<EncryptedMessage> {
        self.policy.authorize(class, algorithm)?;
        let ciphertext = self.registry.encrypt(algorithm, plaintext)?;
        let message = EncryptedMessage {
            id: Uuid::new_v4(),
            ciphertext,
            algorithm,
            author: author.to_owned(),
        };
        debug!(id = %message.id, ?algorithm, author, "message encrypted");
        Ok(message)
    }

    /// Decrypts with the algorithm stored in the message tag, after checking
    /// the caller's class against that same tag.
    pub fn decrypt(&self, class: UserClass, message: &EncryptedMessage) -> Result<Vec<u8>> {
        self.policy.authorize(class, message.algorithm)?;
        self.registry.decrypt(message.algorithm, &message.ciphertext)
    }
}
