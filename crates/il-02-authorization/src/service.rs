//! # Authorization Guard Service
//!
//! ## Check Order
//!
//! ```text
//! admit:      envelope → method → node_id → nonce → signature → params
//! authorize:  chain enabled → signer (or InitNDID self-key) → effective key
//!             → signature → role policy
//! ```
//!
//! The first failing check decides the rejection message.

use crate::domain::{is_permitted, AdmittedTx, Authorized, KeyLookup, NodeKeyCache};
use crate::ports::AuthorizationApi;
use il_01_entity_store::{EntityReader, StateReader};
use il_03_node_registry::{effective_key, KeyKind, ResolveError};
use shared_crypto::PublicKey;
use shared_types::{
    tx_hash, AdmissionError, AuthError, Method, NodeKey, Role, SignedTransaction, TxParams,
};
use tracing::trace;

/// Stateless admission plus state-backed authorization, with a key cache
/// for the apply path.
#[derive(Default)]
pub struct AuthorizationGuard {
    keys: NodeKeyCache,
}

impl AuthorizationGuard {
    /// Guard with a key cache of `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: NodeKeyCache::new(capacity),
        }
    }

    /// Number of cached keys.
    pub fn cached_keys(&self) -> usize {
        self.keys.len()
    }

    fn resolve_key(
        &self,
        reader: &dyn StateReader,
        node_id: &str,
        kind: KeyKind,
        lookup: KeyLookup,
    ) -> Result<NodeKey, AuthError> {
        if lookup == KeyLookup::Cached {
            if let Some(key) = self.keys.get(node_id, kind) {
                return Ok(key);
            }
        }

        let node = reader.node(node_id)?.ok_or(AuthError::NodeNotFound)?;
        let key = effective_key(reader, &node, kind).map_err(|e| match e {
            ResolveError::ProxyNotFound => AuthError::ProxyNotFound,
            ResolveError::Store(err) => err.into(),
        })?;

        if lookup == KeyLookup::Cached {
            self.keys.put(node_id, kind, key.clone());
        }
        Ok(key)
    }
}

fn verify(key: &NodeKey, payload: &[u8], signature: &[u8]) -> Result<(), AuthError> {
    let public_key =
        PublicKey::from_pem(&key.public_key).map_err(|_| AuthError::InvalidPublicKey)?;
    public_key
        .ensure_compatible(key.signing_algorithm)
        .map_err(|_| AuthError::InvalidPublicKey)?;
    public_key
        .verify(key.signing_algorithm, payload, signature)
        .map_err(|_| AuthError::InvalidSignature)
}

impl AuthorizationApi for AuthorizationGuard {
    fn admit(&self, raw: &[u8]) -> Result<AdmittedTx, AdmissionError> {
        let envelope = SignedTransaction::decode(raw)
            .map_err(|e| AdmissionError::MalformedEnvelope(e.to_string()))?;
        let method: Method = envelope
            .method
            .parse()
            .map_err(|_| AdmissionError::UnknownMethod(envelope.method.clone()))?;
        if envelope.node_id.is_empty() {
            return Err(AdmissionError::MissingNodeId);
        }
        let nonce = envelope
            .nonce_bytes()
            .ok()
            .filter(|n| !n.is_empty())
            .ok_or(AdmissionError::MissingNonce)?;
        let signature = envelope
            .signature_bytes()
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(AdmissionError::MissingSignature)?;
        let params =
            TxParams::decode(method, &envelope.params).map_err(|e| AdmissionError::InvalidParams {
                method,
                reason: e.to_string(),
            })?;

        Ok(AdmittedTx {
            method,
            params,
            payload: SignedTransaction::payload(&envelope.method, &envelope.params, &nonce),
            signature,
            hash: tx_hash(raw),
            node_id: envelope.node_id,
        })
    }

    fn authorize(
        &self,
        reader: &dyn StateReader,
        tx: &AdmittedTx,
        height: u64,
        lookup: KeyLookup,
    ) -> Result<Authorized, AuthError> {
        if tx.method != Method::SetLastBlock {
            let last_block = reader.last_block()?;
            if last_block >= 0 && height > last_block as u64 {
                return Err(AuthError::ChainDisabled);
            }
        }

        if let TxParams::InitNdid(params) = &tx.params {
            if params.node_id != tx.node_id {
                return Err(AuthError::Unauthorized(tx.method));
            }
            let key = NodeKey {
                public_key: params.public_key.clone(),
                signing_algorithm: params.signing_algorithm,
            };
            verify(&key, &tx.payload, &tx.signature)?;
            return Ok(Authorized {
                node_id: tx.node_id.clone(),
                role: Role::Ndid,
            });
        }

        let node = reader.node(&tx.node_id)?.ok_or(AuthError::NodeNotFound)?;
        if !node.active {
            return Err(AuthError::NodeInactive);
        }

        let kind = if tx.method.uses_master_key() {
            KeyKind::Master
        } else {
            KeyKind::Signing
        };
        let key = self.resolve_key(reader, &tx.node_id, kind, lookup)?;
        verify(&key, &tx.payload, &tx.signature)?;

        if !is_permitted(node.role, tx.method) {
            return Err(AuthError::Unauthorized(tx.method));
        }

        trace!(method = %tx.method, node_id = %tx.node_id, role = %node.role, "Transaction authorized");
        Ok(Authorized {
            node_id: node.node_id,
            role: node.role,
        })
    }

    fn invalidate_keys(&self) {
        self.keys.clear();
    }
}
