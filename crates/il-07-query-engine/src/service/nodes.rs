//! Node projections.

use super::{answer, answer_list, QueryError};
use crate::domain::{
    BehindProxyListView, BehindProxyView, IdpCapabilities, IdpNodeInfoView, IdpNodeView,
    IdpNodesInfoView, IdpNodesQuery, IdpNodesView, KeyView, NodeIdListQuery, NodeIdQuery,
    NodeIdListView, NodeInfoView, ProxyNodeQuery, ProxyView, TokenView,
};
use il_01_entity_store::{EntityReader, StateReader};
use il_03_node_registry::{effective_key, effective_mq_addresses, proxy_of, KeyKind};
use il_04_identity_ledger::resolve_reference_group;
use shared_types::levels::level_le;
use shared_types::{IdpAssociation, LedgerError, Node, QueryOutcome, Role};

/// The proxy `node` is behind, if any.
pub(super) fn proxy_view<R: StateReader + ?Sized>(
    reader: &R,
    node: &Node,
) -> Result<Option<ProxyView>, QueryError> {
    let (Some(link), Some(proxy)) = (&node.proxy, proxy_of(reader, node)?) else {
        return Ok(None);
    };
    Ok(Some(ProxyView {
        node_id: proxy.node_id,
        node_name: proxy.node_name,
        public_key: proxy.public_key.public_key,
        algorithm: proxy.public_key.signing_algorithm.as_str().to_string(),
        master_public_key: proxy.master_public_key.public_key,
        master_algorithm: proxy.master_public_key.signing_algorithm.as_str().to_string(),
        mq: proxy.mq_addresses,
        config: link.config.as_str().to_string(),
    }))
}

/// `GetNodePublicKey` / `GetNodeMasterPublicKey`: the key the node's
/// transactions verify against.
pub(super) fn node_key<R: StateReader + ?Sized>(
    reader: &R,
    query: &NodeIdQuery,
    kind: KeyKind,
) -> Result<QueryOutcome, QueryError> {
    let Some(node) = reader.node(&query.node_id)? else {
        return answer::<KeyView>(None);
    };
    let key = effective_key(reader, &node, kind)?;
    answer(Some(KeyView::from(&key)))
}

pub(super) fn mq_addresses<R: StateReader + ?Sized>(
    reader: &R,
    query: &NodeIdQuery,
) -> Result<QueryOutcome, QueryError> {
    let addresses = match reader.node(&query.node_id)? {
        Some(node) => effective_mq_addresses(reader, &node)?,
        None => Vec::new(),
    };
    answer_list(addresses)
}

pub(super) fn node_info<R: StateReader + ?Sized>(
    reader: &R,
    query: &NodeIdQuery,
) -> Result<QueryOutcome, QueryError> {
    let Some(node) = reader.node(&query.node_id)? else {
        return answer::<NodeInfoView>(None);
    };
    let proxy = proxy_view(reader, &node)?;
    answer(Some(NodeInfoView::new(&node, proxy)))
}

pub(super) fn node_id_list<R: StateReader + ?Sized>(
    reader: &R,
    query: &NodeIdListQuery,
) -> Result<QueryOutcome, QueryError> {
    let role = if query.role.is_empty() {
        None
    } else {
        match query.role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(()) => return answer::<NodeIdListView>(None),
        }
    };
    let node_id_list: Vec<String> = reader
        .nodes()?
        .into_iter()
        .filter(|n| role.map_or(true, |r| n.role == r))
        .map(|n| n.node_id)
        .collect();
    answer((!node_id_list.is_empty()).then_some(NodeIdListView { node_id_list }))
}

pub(super) fn nodes_behind_proxy<R: StateReader + ?Sized>(
    reader: &R,
    query: &ProxyNodeQuery,
) -> Result<QueryOutcome, QueryError> {
    let nodes: Vec<BehindProxyView> = reader
        .nodes()?
        .into_iter()
        .filter_map(|node| {
            let link = node.proxy.clone()?;
            (link.proxy_node_id == query.proxy_node_id).then(|| BehindProxyView {
                idp: IdpCapabilities::of(&node),
                node_id: node.node_id,
                node_name: node.node_name,
                role: node.role.as_str().to_string(),
                public_key: node.public_key.public_key,
                algorithm: node.public_key.signing_algorithm.as_str().to_string(),
                master_public_key: node.master_public_key.public_key,
                master_algorithm: node.master_public_key.signing_algorithm.as_str().to_string(),
                config: link.config.as_str().to_string(),
            })
        })
        .collect();
    answer((!nodes.is_empty()).then_some(BehindProxyListView { nodes }))
}

pub(super) fn node_token<R: StateReader + ?Sized>(
    reader: &R,
    query: &NodeIdQuery,
) -> Result<QueryOutcome, QueryError> {
    let token = reader
        .node(&query.node_id)?
        .map(|node| TokenView { amount: node.token });
    answer(token)
}

// =============================================================================
// IDP SELECTION
// =============================================================================

/// IdPs able to serve a request with the query's constraints.
///
/// Inactive IdPs, and IdPs behind an inactive proxy, never qualify.
fn eligible_idps<R: StateReader + ?Sized>(
    reader: &R,
    query: &IdpNodesQuery,
) -> Result<Vec<(Node, Option<IdpAssociation>)>, QueryError> {
    let group = if query.names_group() {
        match resolve_reference_group(
            reader,
            &query.reference_group_code,
            &query.identity_namespace,
            &query.identity_identifier_hash,
        ) {
            Ok(group) => Some(group),
            Err(LedgerError::ReferenceGroupNotFound) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }
    } else {
        None
    };

    let mut eligible = Vec::new();
    for node in reader.nodes()? {
        if node.role != Role::Idp || !node.active {
            continue;
        }
        if !query.node_id_list.is_empty() && !query.node_id_list.contains(&node.node_id) {
            continue;
        }
        if !level_le(query.min_ial, node.max_ial) || !level_le(query.min_aal, node.max_aal) {
            continue;
        }
        let association = match &group {
            Some(group) => match group.active_idp(&node.node_id) {
                Some(a) if level_le(query.min_ial, a.ial) => Some(a.clone()),
                _ => continue,
            },
            None => None,
        };
        let modes = association
            .as_ref()
            .map_or(&node.supported_request_mode_list, |a| &a.mode_list);
        if !query
            .supported_request_mode_list
            .iter()
            .all(|m| modes.contains(m))
        {
            continue;
        }
        if let Some(proxy) = proxy_of(reader, &node)? {
            if !proxy.active {
                continue;
            }
        }
        eligible.push((node, association));
    }
    Ok(eligible)
}

fn mode_list(node: &Node, association: &Option<IdpAssociation>) -> Vec<u8> {
    association
        .as_ref()
        .map_or_else(|| node.supported_request_mode_list.clone(), |a| a.mode_list.clone())
}

pub(super) fn idp_nodes<R: StateReader + ?Sized>(
    reader: &R,
    query: &IdpNodesQuery,
) -> Result<QueryOutcome, QueryError> {
    let node: Vec<IdpNodeView> = eligible_idps(reader, query)?
        .into_iter()
        .map(|(node, association)| IdpNodeView {
            mode_list: mode_list(&node, &association),
            ial: association.map(|a| a.ial),
            node_id: node.node_id,
            node_name: node.node_name,
            max_ial: node.max_ial,
            max_aal: node.max_aal,
        })
        .collect();
    answer((!node.is_empty()).then_some(IdpNodesView { node }))
}

pub(super) fn idp_nodes_info<R: StateReader + ?Sized>(
    reader: &R,
    query: &IdpNodesQuery,
) -> Result<QueryOutcome, QueryError> {
    let mut node = Vec::new();
    for (idp, association) in eligible_idps(reader, query)? {
        let key = effective_key(reader, &idp, KeyKind::Signing)?;
        node.push(IdpNodeInfoView {
            mode_list: mode_list(&idp, &association),
            ial: association.map(|a| a.ial),
            public_key: key.public_key,
            algorithm: key.signing_algorithm.as_str().to_string(),
            mq: effective_mq_addresses(reader, &idp)?,
            proxy: proxy_view(reader, &idp)?,
            node_id: idp.node_id,
            name: idp.node_name,
            max_ial: idp.max_ial,
            max_aal: idp.max_aal,
        });
    }
    answer((!node.is_empty()).then_some(IdpNodesInfoView { node }))
}
