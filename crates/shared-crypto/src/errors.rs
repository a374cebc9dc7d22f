//! Crypto error types.

use crate::keys::{KeyType, SigningAlgorithm};
use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// PEM could not be parsed as any supported public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// The declared algorithm cannot be used with this key
    #[error("Signing algorithm {algorithm} is not supported by {key_type:?} key")]
    AlgorithmMismatch {
        /// Declared algorithm
        algorithm: SigningAlgorithm,
        /// Type of the parsed key
        key_type: KeyType,
    },

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Key generation or encoding failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),
}
