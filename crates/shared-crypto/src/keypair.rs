//! # Signing Key Pairs
//!
//! Private-key counterparts of [`PublicKey`](crate::PublicKey). The ledger
//! itself never signs; clients and the test harness do.
//!
//! ECDSA signing is deterministic (RFC 6979) and produces low-S, fixed-width
//! `r || s` signatures. RSA-PSS uses a random salt.

use crate::keys::{KeyType, SigningAlgorithm};
use crate::CryptoError;
use sha2::{Sha256, Sha384, Sha512};

/// A private key of any supported family.
pub enum KeyPair {
    /// RSA
    Rsa(rsa::RsaPrivateKey),
    /// secp256k1
    Secp256k1(k256::ecdsa::SigningKey),
    /// NIST P-256
    P256(p256::ecdsa::SigningKey),
    /// Ed25519
    Ed25519(ed25519_dalek::SigningKey),
}

impl KeyPair {
    /// Random Ed25519 key.
    pub fn generate_ed25519() -> Self {
        KeyPair::Ed25519(ed25519_dalek::SigningKey::generate(&mut rand::thread_rng()))
    }

    /// Ed25519 key from a 32-byte seed.
    pub fn ed25519_from_seed(seed: [u8; 32]) -> Self {
        KeyPair::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed))
    }

    /// Random secp256k1 key.
    pub fn generate_secp256k1() -> Self {
        KeyPair::Secp256k1(k256::ecdsa::SigningKey::random(&mut rand::thread_rng()))
    }

    /// secp256k1 key from a 32-byte scalar.
    pub fn secp256k1_from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let key = k256::ecdsa::SigningKey::from_bytes((&bytes).into())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(KeyPair::Secp256k1(key))
    }

    /// Random P-256 key.
    pub fn generate_p256() -> Self {
        KeyPair::P256(p256::ecdsa::SigningKey::random(&mut rand::thread_rng()))
    }

    /// P-256 key from a 32-byte scalar.
    pub fn p256_from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let key = p256::ecdsa::SigningKey::from_bytes((&bytes).into())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(KeyPair::P256(key))
    }

    /// Random RSA key of `bits` modulus size.
    pub fn generate_rsa(bits: usize) -> Result<Self, CryptoError> {
        let key = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), bits)
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
        Ok(KeyPair::Rsa(key))
    }

    /// Key family.
    pub fn key_type(&self) -> KeyType {
        match self {
            KeyPair::Rsa(_) => KeyType::Rsa,
            KeyPair::Secp256k1(_) | KeyPair::P256(_) => KeyType::Ec,
            KeyPair::Ed25519(_) => KeyType::Ed25519,
        }
    }

    /// Algorithm a client would normally declare for this key.
    pub fn default_algorithm(&self) -> SigningAlgorithm {
        match self {
            KeyPair::Rsa(_) => SigningAlgorithm::RsaPkcs1v15Sha256,
            KeyPair::Secp256k1(_) | KeyPair::P256(_) => SigningAlgorithm::EcdsaSha256,
            KeyPair::Ed25519(_) => SigningAlgorithm::Ed25519,
        }
    }

    /// SPKI PEM of the public half.
    pub fn public_key_pem(&self) -> Result<String, CryptoError> {
        let encoded = match self {
            KeyPair::Rsa(key) => {
                use rsa::pkcs8::{EncodePublicKey, LineEnding};
                rsa::RsaPublicKey::from(key).to_public_key_pem(LineEnding::LF)
            }
            KeyPair::Secp256k1(key) => {
                use k256::pkcs8::{EncodePublicKey, LineEnding};
                key.verifying_key().to_public_key_pem(LineEnding::LF)
            }
            KeyPair::P256(key) => {
                use p256::pkcs8::{EncodePublicKey, LineEnding};
                key.verifying_key().to_public_key_pem(LineEnding::LF)
            }
            KeyPair::Ed25519(key) => {
                use ed25519_dalek::pkcs8::{spki::der::pem::LineEnding, EncodePublicKey};
                key.verifying_key().to_public_key_pem(LineEnding::LF)
            }
        };
        encoded.map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))
    }

    /// Sign `message` with `algorithm`.
    pub fn sign(&self, algorithm: SigningAlgorithm, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if algorithm.key_type() != self.key_type() {
            return Err(CryptoError::AlgorithmMismatch {
                algorithm,
                key_type: self.key_type(),
            });
        }

        match self {
            KeyPair::Rsa(key) => sign_rsa(key, algorithm, message),
            KeyPair::Secp256k1(key) => {
                use k256::ecdsa::signature::hazmat::PrehashSigner;
                let hashed = digest_for(algorithm, message)?;
                let sig: k256::ecdsa::Signature = key
                    .sign_prehash(&hashed)
                    .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
                Ok(sig.to_bytes().to_vec())
            }
            KeyPair::P256(key) => {
                use p256::ecdsa::signature::hazmat::PrehashSigner;
                let hashed = digest_for(algorithm, message)?;
                let sig: p256::ecdsa::Signature = key
                    .sign_prehash(&hashed)
                    .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
                Ok(sig.to_bytes().to_vec())
            }
            KeyPair::Ed25519(key) => {
                use ed25519_dalek::Signer;
                Ok(key.sign(message).to_bytes().to_vec())
            }
        }
    }
}

fn digest_for(algorithm: SigningAlgorithm, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    algorithm
        .hash_algorithm()
        .map(|hash| hash.digest(message))
        .ok_or_else(|| CryptoError::SigningFailed(format!("{algorithm} has no digest")))
}

fn sign_rsa(
    key: &rsa::RsaPrivateKey,
    algorithm: SigningAlgorithm,
    message: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    use rsa::{Pkcs1v15Sign, Pss};

    let hashed = digest_for(algorithm, message)?;
    let mut rng = rand::thread_rng();
    let result = match algorithm {
        SigningAlgorithm::RsaPssSha256 => key.sign_with_rng(&mut rng, Pss::new::<Sha256>(), &hashed),
        SigningAlgorithm::RsaPssSha384 => key.sign_with_rng(&mut rng, Pss::new::<Sha384>(), &hashed),
        SigningAlgorithm::RsaPssSha512 => key.sign_with_rng(&mut rng, Pss::new::<Sha512>(), &hashed),
        SigningAlgorithm::RsaPkcs1v15Sha256 => key.sign(Pkcs1v15Sign::new::<Sha256>(), &hashed),
        SigningAlgorithm::RsaPkcs1v15Sha384 => key.sign(Pkcs1v15Sign::new::<Sha384>(), &hashed),
        SigningAlgorithm::RsaPkcs1v15Sha512 => key.sign(Pkcs1v15Sign::new::<Sha512>(), &hashed),
        other => {
            return Err(CryptoError::AlgorithmMismatch {
                algorithm: other,
                key_type: KeyType::Rsa,
            })
        }
    };
    result.map_err(|e| CryptoError::SigningFailed(e.to_string()))
}
