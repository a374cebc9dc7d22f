//! # Public Keys and Signing Algorithms
//!
//! Node keys and accessor keys are exchanged as PEM (SPKI, or PKCS#1 for
//! RSA). A node declares which algorithm it signs with; verification
//! dispatches on that declaration.
//!
//! | Algorithm | Key | Digest |
//! |-----------|-----|--------|
//! | `RSASSA_PSS_SHA_*` | RSA | SHA-256/384/512 |
//! | `RSASSA_PKCS1_V1_5_SHA_*` | RSA | SHA-256/384/512 |
//! | `ECDSA_SHA_*` | secp256k1 or P-256 | SHA-256/384 (prehash) |
//! | `Ed25519` | Ed25519 | built into the scheme |

use crate::hashing::HashAlgorithm;
use crate::CryptoError;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;

/// Family of a parsed public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// RSA
    #[serde(rename = "RSA")]
    Rsa,
    /// Elliptic curve (secp256k1 or P-256)
    #[serde(rename = "EC")]
    Ec,
    /// Ed25519
    #[serde(rename = "Ed25519")]
    Ed25519,
}

/// Signature scheme a node declares for its keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// RSA-PSS with SHA-256
    #[serde(rename = "RSASSA_PSS_SHA_256")]
    RsaPssSha256,
    /// RSA-PSS with SHA-384
    #[serde(rename = "RSASSA_PSS_SHA_384")]
    RsaPssSha384,
    /// RSA-PSS with SHA-512
    #[serde(rename = "RSASSA_PSS_SHA_512")]
    RsaPssSha512,
    /// RSA PKCS#1 v1.5 with SHA-256
    #[serde(rename = "RSASSA_PKCS1_V1_5_SHA_256")]
    RsaPkcs1v15Sha256,
    /// RSA PKCS#1 v1.5 with SHA-384
    #[serde(rename = "RSASSA_PKCS1_V1_5_SHA_384")]
    RsaPkcs1v15Sha384,
    /// RSA PKCS#1 v1.5 with SHA-512
    #[serde(rename = "RSASSA_PKCS1_V1_5_SHA_512")]
    RsaPkcs1v15Sha512,
    /// ECDSA over SHA-256
    #[serde(rename = "ECDSA_SHA_256")]
    EcdsaSha256,
    /// ECDSA over SHA-384
    #[serde(rename = "ECDSA_SHA_384")]
    EcdsaSha384,
    /// Ed25519
    #[serde(rename = "Ed25519")]
    Ed25519,
}

impl SigningAlgorithm {
    /// Key family this algorithm requires.
    pub fn key_type(&self) -> KeyType {
        match self {
            SigningAlgorithm::RsaPssSha256
            | SigningAlgorithm::RsaPssSha384
            | SigningAlgorithm::RsaPssSha512
            | SigningAlgorithm::RsaPkcs1v15Sha256
            | SigningAlgorithm::RsaPkcs1v15Sha384
            | SigningAlgorithm::RsaPkcs1v15Sha512 => KeyType::Rsa,
            SigningAlgorithm::EcdsaSha256 | SigningAlgorithm::EcdsaSha384 => KeyType::Ec,
            SigningAlgorithm::Ed25519 => KeyType::Ed25519,
        }
    }

    /// Digest applied to the message before signing, if any.
    pub fn hash_algorithm(&self) -> Option<HashAlgorithm> {
        match self {
            SigningAlgorithm::RsaPssSha256
            | SigningAlgorithm::RsaPkcs1v15Sha256
            | SigningAlgorithm::EcdsaSha256 => Some(HashAlgorithm::Sha256),
            SigningAlgorithm::RsaPssSha384
            | SigningAlgorithm::RsaPkcs1v15Sha384
            | SigningAlgorithm::EcdsaSha384 => Some(HashAlgorithm::Sha384),
            SigningAlgorithm::RsaPssSha512 | SigningAlgorithm::RsaPkcs1v15Sha512 => {
                Some(HashAlgorithm::Sha512)
            }
            SigningAlgorithm::Ed25519 => None,
        }
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::RsaPssSha256 => "RSASSA_PSS_SHA_256",
            SigningAlgorithm::RsaPssSha384 => "RSASSA_PSS_SHA_384",
            SigningAlgorithm::RsaPssSha512 => "RSASSA_PSS_SHA_512",
            SigningAlgorithm::RsaPkcs1v15Sha256 => "RSASSA_PKCS1_V1_5_SHA_256",
            SigningAlgorithm::RsaPkcs1v15Sha384 => "RSASSA_PKCS1_V1_5_SHA_384",
            SigningAlgorithm::RsaPkcs1v15Sha512 => "RSASSA_PKCS1_V1_5_SHA_512",
            SigningAlgorithm::EcdsaSha256 => "ECDSA_SHA_256",
            SigningAlgorithm::EcdsaSha384 => "ECDSA_SHA_384",
            SigningAlgorithm::Ed25519 => "Ed25519",
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PUBLIC KEY
// =============================================================================

/// A parsed verification key.
#[derive(Clone, Debug)]
pub enum PublicKey {
    /// RSA key
    Rsa(RsaPublicKey),
    /// secp256k1 ECDSA key
    Secp256k1(k256::ecdsa::VerifyingKey),
    /// NIST P-256 ECDSA key
    P256(p256::ecdsa::VerifyingKey),
    /// Ed25519 key
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    /// Parse a PEM-encoded public key of any supported family.
    pub fn from_pem(pem: &str) -> Result<Self, CryptoError> {
        let pem = pem.trim();
        if pem.is_empty() {
            return Err(CryptoError::InvalidPublicKey);
        }
        if let Some(key) = parse_ed25519(pem) {
            return Ok(PublicKey::Ed25519(key));
        }
        if let Some(key) = parse_secp256k1(pem) {
            return Ok(PublicKey::Secp256k1(key));
        }
        if let Some(key) = parse_p256(pem) {
            return Ok(PublicKey::P256(key));
        }
        if let Some(key) = parse_rsa(pem) {
            return Ok(PublicKey::Rsa(key));
        }
        Err(CryptoError::InvalidPublicKey)
    }

    /// Key family.
    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Rsa(_) => KeyType::Rsa,
            PublicKey::Secp256k1(_) | PublicKey::P256(_) => KeyType::Ec,
            PublicKey::Ed25519(_) => KeyType::Ed25519,
        }
    }

    /// Check that `algorithm` can be used with this key.
    pub fn ensure_compatible(&self, algorithm: SigningAlgorithm) -> Result<(), CryptoError> {
        if algorithm.key_type() != self.key_type() {
            return Err(CryptoError::AlgorithmMismatch {
                algorithm,
                key_type: self.key_type(),
            });
        }
        Ok(())
    }

    /// Verify `signature` over `message` using `algorithm`.
    ///
    /// For RSA and ECDSA the message is hashed with the algorithm's digest
    /// first; Ed25519 signs the raw message.
    pub fn verify(
        &self,
        algorithm: SigningAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        self.ensure_compatible(algorithm)?;

        match self {
            PublicKey::Rsa(key) => verify_rsa(key, algorithm, message, signature),
            PublicKey::Secp256k1(key) => {
                use k256::ecdsa::signature::hazmat::PrehashVerifier;
                let hashed = prehash(algorithm, message)?;
                let sig = if signature.len() == 64 {
                    k256::ecdsa::Signature::from_slice(signature)
                } else {
                    k256::ecdsa::Signature::from_der(signature)
                }
                .map_err(|_| CryptoError::InvalidSignatureFormat)?;
                // secp256k1 verification only accepts low-S
                let sig = sig.normalize_s().unwrap_or(sig);
                key.verify_prehash(&hashed, &sig)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
            PublicKey::P256(key) => {
                use p256::ecdsa::signature::hazmat::PrehashVerifier;
                let hashed = prehash(algorithm, message)?;
                let sig = if signature.len() == 64 {
                    p256::ecdsa::Signature::from_slice(signature)
                } else {
                    p256::ecdsa::Signature::from_der(signature)
                }
                .map_err(|_| CryptoError::InvalidSignatureFormat)?;
                key.verify_prehash(&hashed, &sig)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
            PublicKey::Ed25519(key) => {
                use ed25519_dalek::Verifier;
                let sig = ed25519_dalek::Signature::from_slice(signature)
                    .map_err(|_| CryptoError::InvalidSignatureFormat)?;
                key.verify(message, &sig)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
        }
    }
}

fn prehash(algorithm: SigningAlgorithm, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    algorithm
        .hash_algorithm()
        .map(|hash| hash.digest(message))
        .ok_or(CryptoError::AlgorithmMismatch {
            algorithm,
            key_type: algorithm.key_type(),
        })
}

fn verify_rsa(
    key: &RsaPublicKey,
    algorithm: SigningAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    use rsa::{Pkcs1v15Sign, Pss};

    let hashed = prehash(algorithm, message)?;
    let result = match algorithm {
        SigningAlgorithm::RsaPssSha256 => key.verify(Pss::new::<Sha256>(), &hashed, signature),
        SigningAlgorithm::RsaPssSha384 => key.verify(Pss::new::<Sha384>(), &hashed, signature),
        SigningAlgorithm::RsaPssSha512 => key.verify(Pss::new::<Sha512>(), &hashed, signature),
        SigningAlgorithm::RsaPkcs1v15Sha256 => {
            key.verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
        }
        SigningAlgorithm::RsaPkcs1v15Sha384 => {
            key.verify(Pkcs1v15Sign::new::<Sha384>(), &hashed, signature)
        }
        SigningAlgorithm::RsaPkcs1v15Sha512 => {
            key.verify(Pkcs1v15Sign::new::<Sha512>(), &hashed, signature)
        }
        other => {
            return Err(CryptoError::AlgorithmMismatch {
                algorithm: other,
                key_type: KeyType::Rsa,
            })
        }
    };
    result.map_err(|_| CryptoError::SignatureVerificationFailed)
}

fn parse_rsa(pem: &str) -> Option<RsaPublicKey> {
    use rsa::pkcs1::DecodeRsaPublicKey;
    use rsa::pkcs8::DecodePublicKey;

    RsaPublicKey::from_public_key_pem(pem)
        .ok()
        .or_else(|| RsaPublicKey::from_pkcs1_pem(pem).ok())
}

fn parse_secp256k1(pem: &str) -> Option<k256::ecdsa::VerifyingKey> {
    use k256::pkcs8::DecodePublicKey;
    k256::ecdsa::VerifyingKey::from_public_key_pem(pem).ok()
}

fn parse_p256(pem: &str) -> Option<p256::ecdsa::VerifyingKey> {
    use p256::pkcs8::DecodePublicKey;
    p256::ecdsa::VerifyingKey::from_public_key_pem(pem).ok()
}

fn parse_ed25519(pem: &str) -> Option<ed25519_dalek::VerifyingKey> {
    use ed25519_dalek::pkcs8::DecodePublicKey;
    ed25519_dalek::VerifyingKey::from_public_key_pem(pem).ok()
}
