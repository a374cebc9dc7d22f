//! Node key validation.

use shared_crypto::{PublicKey, SigningAlgorithm};
use shared_types::{LedgerError, NodeKey};

/// Parse `pem` and check it can sign with `algorithm`.
pub fn validate_node_key(pem: &str, algorithm: SigningAlgorithm) -> Result<NodeKey, LedgerError> {
    let key = PublicKey::from_pem(pem).map_err(|_| LedgerError::InvalidPublicKey)?;
    key.ensure_compatible(algorithm)
        .map_err(|_| LedgerError::KeyAlgorithmMismatch)?;
    Ok(NodeKey {
        public_key: pem.to_string(),
        signing_algorithm: algorithm,
    })
}
