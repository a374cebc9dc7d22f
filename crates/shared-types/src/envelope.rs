//! # Transaction and Query Envelopes
//!
//! The wire shape the replication engine hands to the ledger, and the
//! outcome shapes it gets back.
//!
//! ## Signed Payload
//!
//! A signature covers `method ‖ params ‖ nonce`, where `params` is the exact
//! JSON text carried in the envelope and `nonce` is the decoded nonce bytes.
//! Nonces only make otherwise identical payloads hash differently; the
//! ledger keeps no nonce history.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use shared_crypto::{sha256, Hash};

/// Outcome code for accepted transactions and successful queries.
pub const CODE_OK: u32 = 0;
/// Rejected before any state read.
pub const CODE_ADMISSION: u32 = 1;
/// Rejected by signer, signature or role checks.
pub const CODE_AUTHORIZATION: u32 = 2;
/// Rejected by a business rule.
pub const CODE_BUSINESS: u32 = 3;

/// Log text of an accepted transaction or a found query result.
pub const LOG_SUCCESS: &str = "success";
/// Log text of a query with an empty result.
pub const LOG_NOT_FOUND: &str = "not found";

/// A signed transaction as submitted by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Method name.
    pub method: String,
    /// Method-specific JSON, kept as text so the signed bytes are exact.
    pub params: String,
    /// Base64 nonce.
    pub nonce: String,
    /// Base64 signature over [`SignedTransaction::signed_payload`].
    pub signature: String,
    /// Signer.
    pub node_id: String,
}

impl SignedTransaction {
    /// Build an envelope from raw parts.
    pub fn new(
        method: impl Into<String>,
        params: impl Into<String>,
        nonce: &[u8],
        signature: &[u8],
        node_id: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            params: params.into(),
            nonce: BASE64.encode(nonce),
            signature: BASE64.encode(signature),
            node_id: node_id.into(),
        }
    }

    /// Bytes a signer signs: `method ‖ params ‖ nonce`.
    pub fn payload(method: &str, params: &str, nonce: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(method.len() + params.len() + nonce.len());
        out.extend_from_slice(method.as_bytes());
        out.extend_from_slice(params.as_bytes());
        out.extend_from_slice(nonce);
        out
    }

    /// Signed payload of this envelope.
    pub fn signed_payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
        Ok(Self::payload(&self.method, &self.params, &self.nonce_bytes()?))
    }

    /// Decoded nonce.
    pub fn nonce_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.nonce)
    }

    /// Decoded signature.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.signature)
    }

    /// Wire encoding.
    pub fn encode(&self) -> Vec<u8> {
        // A struct of strings always serializes.
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Parse the wire encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Content address of an encoded transaction.
pub fn tx_hash(encoded: &[u8]) -> Hash {
    sha256(encoded)
}

/// Result of `validate` / `apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutcome {
    /// 0 on success, otherwise the rejection class.
    pub code: u32,
    /// "success" or the rejection message.
    pub log: String,
}

impl TxOutcome {
    /// Accepted.
    pub fn success() -> Self {
        Self {
            code: CODE_OK,
            log: LOG_SUCCESS.to_string(),
        }
    }

    /// Rejected with `code`.
    pub fn rejected(code: u32, log: impl Into<String>) -> Self {
        Self {
            code,
            log: log.into(),
        }
    }

    /// Whether the transaction was accepted.
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// An unauthenticated read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Query method name.
    pub method: String,
    /// Method-specific JSON.
    #[serde(default)]
    pub params: String,
}

/// Result of `query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// "success", "not found", or an error message.
    pub log: String,
    /// JSON value.
    pub value: String,
}

impl QueryOutcome {
    /// Found.
    pub fn found(value: String) -> Self {
        Self {
            log: LOG_SUCCESS.to_string(),
            value,
        }
    }

    /// Empty result rendered as `value`.
    pub fn not_found(value: String) -> Self {
        Self {
            log: LOG_NOT_FOUND.to_string(),
            value,
        }
    }

    /// Query could not be served.
    pub fn error(log: impl Into<String>) -> Self {
        Self {
            log: log.into(),
            value: String::new(),
        }
    }
}
