//! Entity store error types.

use shared_types::{AuthError, LedgerError};
use thiserror::Error;

/// Failures of the key-value store or of entity decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend I/O failure.
    #[error("I/O error: {message}")]
    IOError {
        /// Backend message.
        message: String,
    },

    /// Stored bytes do not decode into the expected entity.
    #[error("Corrupted entry at {key}: {reason}")]
    Corrupted {
        /// Printable key.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Entity could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        LedgerError::Store(err.to_string())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(err.to_string())
    }
}
