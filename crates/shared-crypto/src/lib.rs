//! # Shared Crypto - Node and Accessor Keys
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256/384/512 | Digests, transaction ids, state root |
//! | `keys` | RSA, ECDSA (secp256k1, P-256), Ed25519 | PEM parsing and verification |
//! | `keypair` | same | Signing (clients and tests) |
//!
//! Every ledger-facing key is a PEM string; [`PublicKey::from_pem`] decides
//! the family and [`PublicKey::verify`] checks a signature under the
//! algorithm the node declared.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod keypair;
pub mod keys;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, Hash, HashAlgorithm};
pub use keypair::KeyPair;
pub use keys::{KeyType, PublicKey, SigningAlgorithm};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
