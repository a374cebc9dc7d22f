//! # Effective Key and Transport Resolution
//!
//! A node behind a proxy with `KEY_ON_PROXY` signs with the proxy's keys.
//! A node behind any proxy is reached through the proxy's MQ addresses.
//! The proxy link is a lookup key, resolved on every call.

use il_01_entity_store::{EntityReader, StateReader, StoreError};
use shared_types::{MqAddress, Node, NodeKey, ProxyConfig};
use thiserror::Error;

/// Which of a node's keys to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Transaction signing key.
    Signing,
    /// Master key (key rotation only).
    Master,
}

/// Resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The node's proxy record is missing.
    #[error("Proxy node not found")]
    ProxyNotFound,
    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn own_key(node: &Node, kind: KeyKind) -> NodeKey {
    match kind {
        KeyKind::Signing => node.public_key.clone(),
        KeyKind::Master => node.master_public_key.clone(),
    }
}

/// Proxy record of `node`, if it is behind one.
pub fn proxy_of<R: StateReader + ?Sized>(reader: &R, node: &Node) -> Result<Option<Node>, ResolveError> {
    match node.proxy_node_id() {
        Some(proxy_id) => reader
            .node(proxy_id)?
            .map(Some)
            .ok_or(ResolveError::ProxyNotFound),
        None => Ok(None),
    }
}

/// Key that verifies `node`'s transactions.
pub fn effective_key<R: StateReader + ?Sized>(
    reader: &R,
    node: &Node,
    kind: KeyKind,
) -> Result<NodeKey, ResolveError> {
    match &node.proxy {
        Some(link) if link.config == ProxyConfig::KeyOnProxy => {
            let proxy = reader
                .node(&link.proxy_node_id)?
                .ok_or(ResolveError::ProxyNotFound)?;
            Ok(own_key(&proxy, kind))
        }
        Some(_) => {
            // KEY_ON_NODE still requires a live proxy record.
            proxy_of(reader, node)?;
            Ok(own_key(node, kind))
        }
        None => Ok(own_key(node, kind)),
    }
}

/// Transport endpoints `node` is reached at.
pub fn effective_mq_addresses<R: StateReader + ?Sized>(
    reader: &R,
    node: &Node,
) -> Result<Vec<MqAddress>, ResolveError> {
    match proxy_of(reader, node)? {
        Some(proxy) => Ok(proxy.mq_addresses),
        None => Ok(node.mq_addresses.clone()),
    }
}
