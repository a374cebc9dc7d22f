//! Admitted and authorized transactions.

use shared_crypto::Hash;
use shared_types::{Method, Role, TxParams};

/// A transaction that passed admission: envelope decoded, method known,
/// params decoded into their closed type.
#[derive(Debug, Clone)]
pub struct AdmittedTx {
    /// Method tag.
    pub method: Method,
    /// Decoded parameters.
    pub params: TxParams,
    /// Signer node id.
    pub node_id: String,
    /// `method ‖ params ‖ nonce`.
    pub payload: Vec<u8>,
    /// Decoded signature.
    pub signature: Vec<u8>,
    /// Hash of the encoded envelope.
    pub hash: Hash,
}

/// Whether authorization may use the node key cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLookup {
    /// Resolve through the cache (apply path).
    Cached,
    /// Always resolve from state (validate path).
    Fresh,
}

/// Caller identity established by authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorized {
    /// Signer node id.
    pub node_id: String,
    /// Signer role; NDID for `InitNDID`.
    pub role: Role,
}
