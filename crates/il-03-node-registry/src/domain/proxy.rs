//! # Proxy Association Rules
//!
//! - a node cannot be its own proxy
//! - the target must have role Proxy
//! - only RP, IdP and AS nodes can be proxied
//! - following proxy links from the target must never reach the node

use il_01_entity_store::{EntityReader, StateReader};
use shared_types::{LedgerError, Node, Role};
use std::collections::HashSet;

/// Check that `node` may be placed behind `proxy_node_id`, apart from the
/// cycle walk.
///
/// Returns the proxy record on success.
pub fn check_proxy_target<R: StateReader + ?Sized>(
    reader: &R,
    node: &Node,
    proxy_node_id: &str,
) -> Result<Node, LedgerError> {
    let proxy = reader
        .node(proxy_node_id)?
        .ok_or(LedgerError::ProxyNodeNotFound)?;
    if node.node_id == proxy_node_id {
        return Err(LedgerError::OwnProxy);
    }
    if proxy.role != Role::Proxy {
        return Err(LedgerError::NotProxyNode);
    }
    if !matches!(node.role, Role::Rp | Role::Idp | Role::As) {
        return Err(LedgerError::ProxyRoleNotAllowed);
    }
    Ok(proxy)
}

/// Walk the proxy chain starting at `start` and fail if it reaches `node_id`.
pub fn ensure_no_cycle<R: StateReader + ?Sized>(
    reader: &R,
    node_id: &str,
    start: &Node,
) -> Result<(), LedgerError> {
    let mut visited = HashSet::new();
    let mut current = start.clone();
    loop {
        if current.node_id == node_id {
            return Err(LedgerError::ProxyCycle);
        }
        if !visited.insert(current.node_id.clone()) {
            return Err(LedgerError::Invariant(format!(
                "proxy chain through {} loops",
                current.node_id
            )));
        }
        let Some(next_id) = current.proxy_node_id().map(str::to_string) else {
            return Ok(());
        };
        current = reader.node(&next_id)?.ok_or_else(|| {
            LedgerError::Invariant(format!("proxy {next_id} of {} missing", current.node_id))
        })?;
    }
}
