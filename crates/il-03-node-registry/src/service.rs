//! # Node Registry Handlers
//!
//! One function per node/proxy method. Each reads and writes through the
//! transaction's state scope and either succeeds or leaves its staged writes
//! to be dropped by the dispatcher.

use crate::domain::{check_proxy_target, ensure_no_cycle, validate_node_key};
use il_01_entity_store::{EntityReader, EntityWriter, StateWriter};
use shared_types::levels::{is_valid_aal, is_valid_ial, is_valid_mode_list, DEFAULT_ALLOWED_MODES};
use shared_types::{
    AddNodeToProxyNodeParams, InitNdidParams, LedgerError, Node, NodeIdParams, NodeTokenParams,
    ProxyLink, RegisterNodeParams, Role, SetMqAddressesParams, TxContext, UpdateNodeByNdidParams,
    UpdateNodeParams, UpdateNodeProxyNodeParams,
};
use tracing::info;

fn require_node<S: StateWriter + ?Sized>(state: &S, node_id: &str) -> Result<Node, LedgerError> {
    state.node(node_id)?.ok_or(LedgerError::NodeNotFound)
}

fn validate_ceilings(max_ial: f64, max_aal: f64) -> Result<(), LedgerError> {
    if !is_valid_ial(max_ial) {
        return Err(LedgerError::InvalidIal);
    }
    if !is_valid_aal(max_aal) {
        return Err(LedgerError::InvalidAal);
    }
    Ok(())
}

fn validate_modes(modes: &[u8]) -> Result<Vec<u8>, LedgerError> {
    if modes.is_empty() {
        return Ok(DEFAULT_ALLOWED_MODES.to_vec());
    }
    if !is_valid_mode_list(modes) {
        return Err(LedgerError::InvalidMode);
    }
    Ok(modes.to_vec())
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// `InitNDID`: create the network operator node. Allowed once.
pub fn init_ndid<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &InitNdidParams,
) -> Result<(), LedgerError> {
    if state.ndid_node_id()?.is_some() {
        return Err(LedgerError::NdidAlreadyExisted);
    }
    if params.node_id.is_empty() {
        return Err(LedgerError::NodeIdRequired);
    }
    if state.node_exists(&params.node_id)? {
        return Err(LedgerError::DuplicateNodeId);
    }
    let public_key = validate_node_key(&params.public_key, params.signing_algorithm)?;
    let master_public_key =
        validate_node_key(&params.master_public_key, params.master_signing_algorithm)?;

    state.put_node(&Node {
        node_id: params.node_id.clone(),
        node_name: params.node_name.clone(),
        role: Role::Ndid,
        public_key,
        master_public_key,
        active: true,
        token: 0.0,
        max_ial: 0.0,
        max_aal: 0.0,
        supported_request_mode_list: Vec::new(),
        mq_addresses: Vec::new(),
        proxy: None,
    })?;
    state.set_ndid_node_id(&params.node_id)?;

    info!(node_id = %params.node_id, height = ctx.height, "NDID node initialized");
    Ok(())
}

/// `RegisterNode`: NDID registers an RP, IdP, AS or Proxy node.
pub fn register_node<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &RegisterNodeParams,
) -> Result<(), LedgerError> {
    if params.node_id.is_empty() {
        return Err(LedgerError::NodeIdRequired);
    }
    if state.node_exists(&params.node_id)? {
        return Err(LedgerError::DuplicateNodeId);
    }
    let role: Role = params.role.parse().map_err(|_| LedgerError::InvalidRole)?;
    if role == Role::Ndid {
        return Err(LedgerError::InvalidRole);
    }
    let public_key = validate_node_key(&params.public_key, params.signing_algorithm)?;
    let master_public_key =
        validate_node_key(&params.master_public_key, params.master_signing_algorithm)?;

    let (max_ial, max_aal, modes) = if role == Role::Idp {
        validate_ceilings(params.max_ial, params.max_aal)?;
        (
            params.max_ial,
            params.max_aal,
            validate_modes(&params.supported_request_mode_list)?,
        )
    } else {
        (0.0, 0.0, Vec::new())
    };

    state.put_node(&Node {
        node_id: params.node_id.clone(),
        node_name: params.node_name.clone(),
        role,
        public_key,
        master_public_key,
        active: true,
        token: 0.0,
        max_ial,
        max_aal,
        supported_request_mode_list: modes,
        mq_addresses: Vec::new(),
        proxy: None,
    })?;
    Ok(())
}

/// `UpdateNode`: the caller changes its own name or keys.
///
/// A new key without an algorithm keeps the current algorithm.
pub fn update_node<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &UpdateNodeParams,
) -> Result<(), LedgerError> {
    let mut node = require_node(state, &ctx.caller_id)?;

    if let Some(name) = &params.node_name {
        node.node_name = name.clone();
    }
    if params.public_key.is_some() || params.signing_algorithm.is_some() {
        let pem = params
            .public_key
            .as_deref()
            .unwrap_or(&node.public_key.public_key);
        let algorithm = params
            .signing_algorithm
            .unwrap_or(node.public_key.signing_algorithm);
        node.public_key = validate_node_key(pem, algorithm)?;
    }
    if params.master_public_key.is_some() || params.master_signing_algorithm.is_some() {
        let pem = params
            .master_public_key
            .as_deref()
            .unwrap_or(&node.master_public_key.public_key);
        let algorithm = params
            .master_signing_algorithm
            .unwrap_or(node.master_public_key.signing_algorithm);
        node.master_public_key = validate_node_key(pem, algorithm)?;
    }

    state.put_node(&node)?;
    Ok(())
}

/// `UpdateNodeByNDID`: name for any node, ceilings and modes for IdPs.
pub fn update_node_by_ndid<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &UpdateNodeByNdidParams,
) -> Result<(), LedgerError> {
    let mut node = require_node(state, &params.node_id)?;

    let touches_idp_fields = params.max_ial.is_some()
        || params.max_aal.is_some()
        || params.supported_request_mode_list.is_some();
    if touches_idp_fields && node.role != Role::Idp {
        return Err(LedgerError::NodeNotIdp);
    }

    if let Some(name) = &params.node_name {
        node.node_name = name.clone();
    }
    if let Some(max_ial) = params.max_ial {
        if !is_valid_ial(max_ial) {
            return Err(LedgerError::InvalidIal);
        }
        node.max_ial = max_ial;
    }
    if let Some(max_aal) = params.max_aal {
        if !is_valid_aal(max_aal) {
            return Err(LedgerError::InvalidAal);
        }
        node.max_aal = max_aal;
    }
    if let Some(modes) = &params.supported_request_mode_list {
        if !is_valid_mode_list(modes) {
            return Err(LedgerError::InvalidMode);
        }
        node.supported_request_mode_list = modes.clone();
    }

    state.put_node(&node)?;
    Ok(())
}

/// `SetMqAddresses`: transport endpoints of the caller, or of a node the
/// caller proxies.
pub fn set_mq_addresses<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &SetMqAddressesParams,
) -> Result<(), LedgerError> {
    if params.addresses.is_empty()
        || params
            .addresses
            .iter()
            .any(|a| a.ip.trim().is_empty() || a.port == 0)
    {
        return Err(LedgerError::InvalidMqAddress);
    }

    let target = params.node_id.as_deref().unwrap_or(&ctx.caller_id);
    let mut node = require_node(state, target)?;
    if node.node_id != ctx.caller_id && node.proxy_node_id() != Some(ctx.caller_id.as_str()) {
        return Err(LedgerError::NotBehindProxy);
    }

    node.mq_addresses = params.addresses.clone();
    state.put_node(&node)?;
    Ok(())
}

/// `DisableNode` / `EnableNode`.
pub fn set_node_active<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &NodeIdParams,
    active: bool,
) -> Result<(), LedgerError> {
    let mut node = require_node(state, &params.node_id)?;
    node.active = active;
    state.put_node(&node)?;
    Ok(())
}

// =============================================================================
// TOKENS
// =============================================================================

fn checked_amount(amount: f64) -> Result<f64, LedgerError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::NegativeAmount);
    }
    Ok(amount)
}

/// `AddNodeToken`.
pub fn add_node_token<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &NodeTokenParams,
) -> Result<(), LedgerError> {
    let amount = checked_amount(params.amount)?;
    let mut node = require_node(state, &params.node_id)?;
    node.token += amount;
    if !node.token.is_finite() {
        return Err(LedgerError::TokenOverflow);
    }
    state.put_node(&node)?;
    Ok(())
}

/// `ReduceNodeToken`.
pub fn reduce_node_token<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &NodeTokenParams,
) -> Result<(), LedgerError> {
    let amount = checked_amount(params.amount)?;
    let mut node = require_node(state, &params.node_id)?;
    if node.token < amount {
        return Err(LedgerError::TokenNotEnough);
    }
    node.token -= amount;
    state.put_node(&node)?;
    Ok(())
}

/// `SetNodeToken`.
pub fn set_node_token<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &NodeTokenParams,
) -> Result<(), LedgerError> {
    let amount = checked_amount(params.amount)?;
    let mut node = require_node(state, &params.node_id)?;
    node.token = amount;
    state.put_node(&node)?;
    Ok(())
}

// =============================================================================
// PROXIES
// =============================================================================

/// `AddNodeToProxyNode`.
pub fn add_node_to_proxy<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &AddNodeToProxyNodeParams,
) -> Result<(), LedgerError> {
    let mut node = require_node(state, &params.node_id)?;
    let proxy = check_proxy_target(state, &node, &params.proxy_node_id)?;
    if node.is_behind_proxy() {
        return Err(LedgerError::AlreadyBehindProxy);
    }
    ensure_no_cycle(state, &node.node_id, &proxy)?;

    node.proxy = Some(ProxyLink {
        proxy_node_id: params.proxy_node_id.clone(),
        config: params.config,
    });
    state.put_node(&node)?;
    Ok(())
}

/// `UpdateNodeProxyNode`: move to another proxy and/or change key location.
pub fn update_node_proxy<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &UpdateNodeProxyNodeParams,
) -> Result<(), LedgerError> {
    let mut node = require_node(state, &params.node_id)?;
    let Some(mut link) = node.proxy.clone() else {
        return Err(LedgerError::NotBehindProxy);
    };

    if let Some(proxy_node_id) = &params.proxy_node_id {
        let proxy = check_proxy_target(state, &node, proxy_node_id)?;
        ensure_no_cycle(state, &node.node_id, &proxy)?;
        link.proxy_node_id = proxy_node_id.clone();
    }
    if let Some(config) = params.config {
        link.config = config;
    }

    node.proxy = Some(link);
    state.put_node(&node)?;
    Ok(())
}

/// `RemoveNodeFromProxyNode`.
pub fn remove_node_from_proxy<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &NodeIdParams,
) -> Result<(), LedgerError> {
    let mut node = require_node(state, &params.node_id)?;
    if node.proxy.take().is_none() {
        return Err(LedgerError::NotBehindProxy);
    }
    state.put_node(&node)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{effective_key, effective_mq_addresses, KeyKind};
    use il_01_entity_store::{InMemoryKVStore, StateDb, TxState};
    use shared_crypto::{KeyPair, SigningAlgorithm};
    use shared_types::{Method, MqAddress, ProxyConfig};

    fn pem() -> String {
        KeyPair::generate_ed25519().public_key_pem().unwrap()
    }

    fn ctx(method: Method, caller: &str, role: Role) -> TxContext {
        TxContext::new(method, caller, role, 1)
    }

    fn ndid_ctx(method: Method) -> TxContext {
        ctx(method, "ndid1", Role::Ndid)
    }

    fn init(tx: &mut TxState<'_>) {
        let key = pem();
        init_ndid(
            tx,
            &ndid_ctx(Method::InitNdid),
            &InitNdidParams {
                node_id: "ndid1".into(),
                node_name: "operator".into(),
                public_key: key.clone(),
                signing_algorithm: SigningAlgorithm::Ed25519,
                master_public_key: key,
                master_signing_algorithm: SigningAlgorithm::Ed25519,
            },
        )
        .unwrap();
    }

    fn register_params(node_id: &str, role: &str) -> RegisterNodeParams {
        RegisterNodeParams {
            node_id: node_id.into(),
            node_name: String::new(),
            role: role.into(),
            public_key: pem(),
            signing_algorithm: SigningAlgorithm::Ed25519,
            master_public_key: pem(),
            master_signing_algorithm: SigningAlgorithm::Ed25519,
            max_ial: 2.3,
            max_aal: 3.0,
            supported_request_mode_list: vec![],
        }
    }

    fn register(tx: &mut TxState<'_>, node_id: &str, role: &str) {
        register_node(tx, &ndid_ctx(Method::RegisterNode), &register_params(node_id, role)).unwrap();
    }

    fn proxy_params(node_id: &str, proxy: &str, config: ProxyConfig) -> AddNodeToProxyNodeParams {
        AddNodeToProxyNodeParams {
            node_id: node_id.into(),
            proxy_node_id: proxy.into(),
            config,
        }
    }

    #[test]
    fn test_init_ndid_only_once() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        assert_eq!(tx.ndid_node_id().unwrap().as_deref(), Some("ndid1"));

        let key = pem();
        let again = init_ndid(
            &mut tx,
            &ndid_ctx(Method::InitNdid),
            &InitNdidParams {
                node_id: "ndid2".into(),
                node_name: String::new(),
                public_key: key.clone(),
                signing_algorithm: SigningAlgorithm::Ed25519,
                master_public_key: key,
                master_signing_algorithm: SigningAlgorithm::Ed25519,
            },
        );
        assert_eq!(again, Err(LedgerError::NdidAlreadyExisted));
    }

    #[test]
    fn test_register_node_rules() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        let c = ndid_ctx(Method::RegisterNode);

        register(&mut tx, "idp1", "IdP");
        let idp = tx.node("idp1").unwrap().unwrap();
        assert_eq!(idp.supported_request_mode_list, vec![1, 2, 3]);
        assert_eq!(idp.max_ial, 2.3);

        register(&mut tx, "rp1", "RP");
        let rp = tx.node("rp1").unwrap().unwrap();
        assert_eq!((rp.max_ial, rp.max_aal), (0.0, 0.0));

        assert_eq!(
            register_node(&mut tx, &c, &register_params("idp1", "IdP")),
            Err(LedgerError::DuplicateNodeId)
        );
        assert_eq!(
            register_node(&mut tx, &c, &register_params("x", "NDID")),
            Err(LedgerError::InvalidRole)
        );
        assert_eq!(
            register_node(&mut tx, &c, &register_params("x", "Admin")),
            Err(LedgerError::InvalidRole)
        );
        assert_eq!(
            register_node(&mut tx, &c, &register_params("", "RP")),
            Err(LedgerError::NodeIdRequired)
        );

        let mut bad_ial = register_params("idp2", "IdP");
        bad_ial.max_ial = 2.5;
        assert_eq!(register_node(&mut tx, &c, &bad_ial), Err(LedgerError::InvalidIal));

        let mut bad_key = register_params("rp2", "RP");
        bad_key.signing_algorithm = SigningAlgorithm::RsaPkcs1v15Sha256;
        assert_eq!(
            register_node(&mut tx, &c, &bad_key),
            Err(LedgerError::KeyAlgorithmMismatch)
        );
    }

    #[test]
    fn test_update_node_keeps_algorithm_when_omitted() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        register(&mut tx, "rp1", "RP");

        let new_key = pem();
        update_node(
            &mut tx,
            &ctx(Method::UpdateNode, "rp1", Role::Rp),
            &UpdateNodeParams {
                node_name: Some("renamed".into()),
                public_key: Some(new_key.clone()),
                signing_algorithm: None,
                master_public_key: None,
                master_signing_algorithm: None,
            },
        )
        .unwrap();
        let node = tx.node("rp1").unwrap().unwrap();
        assert_eq!(node.node_name, "renamed");
        assert_eq!(node.public_key.public_key, new_key);
        assert_eq!(node.public_key.signing_algorithm, SigningAlgorithm::Ed25519);
    }

    #[test]
    fn test_update_node_by_ndid_idp_fields() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        register(&mut tx, "idp1", "IdP");
        register(&mut tx, "rp1", "RP");
        let c = ndid_ctx(Method::UpdateNodeByNdid);

        update_node_by_ndid(
            &mut tx,
            &c,
            &UpdateNodeByNdidParams {
                node_id: "idp1".into(),
                node_name: None,
                max_ial: Some(3.0),
                max_aal: None,
                supported_request_mode_list: Some(vec![2, 3]),
            },
        )
        .unwrap();
        let idp = tx.node("idp1").unwrap().unwrap();
        assert_eq!(idp.max_ial, 3.0);
        assert_eq!(idp.supported_request_mode_list, vec![2, 3]);

        let result = update_node_by_ndid(
            &mut tx,
            &c,
            &UpdateNodeByNdidParams {
                node_id: "rp1".into(),
                node_name: None,
                max_ial: Some(3.0),
                max_aal: None,
                supported_request_mode_list: None,
            },
        );
        assert_eq!(result, Err(LedgerError::NodeNotIdp));
    }

    #[test]
    fn test_mq_addresses_validation_and_proxy_target() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        register(&mut tx, "rp1", "RP");
        register(&mut tx, "proxy1", "Proxy");
        let addr = |ip: &str, port| MqAddress { ip: ip.into(), port };

        let rp = ctx(Method::SetMqAddresses, "rp1", Role::Rp);
        for bad in [vec![], vec![addr("", 5555)], vec![addr("10.0.0.1", 0)]] {
            let params = SetMqAddressesParams { node_id: None, addresses: bad };
            assert_eq!(
                set_mq_addresses(&mut tx, &rp, &params),
                Err(LedgerError::InvalidMqAddress)
            );
        }
        set_mq_addresses(
            &mut tx,
            &rp,
            &SetMqAddressesParams { node_id: None, addresses: vec![addr("10.0.0.1", 5555)] },
        )
        .unwrap();

        let proxy = ctx(Method::SetMqAddresses, "proxy1", Role::Proxy);
        let for_rp = SetMqAddressesParams {
            node_id: Some("rp1".into()),
            addresses: vec![addr("10.0.0.9", 7000)],
        };
        assert_eq!(
            set_mq_addresses(&mut tx, &proxy, &for_rp),
            Err(LedgerError::NotBehindProxy)
        );
        add_node_to_proxy(
            &mut tx,
            &ndid_ctx(Method::AddNodeToProxyNode),
            &proxy_params("rp1", "proxy1", ProxyConfig::KeyOnNode),
        )
        .unwrap();
        set_mq_addresses(&mut tx, &proxy, &for_rp).unwrap();
    }

    #[test]
    fn test_token_arithmetic() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        register(&mut tx, "rp1", "RP");
        let c = ndid_ctx(Method::AddNodeToken);
        let amount = |amount| NodeTokenParams { node_id: "rp1".into(), amount };

        add_node_token(&mut tx, &c, &amount(10.0)).unwrap();
        reduce_node_token(&mut tx, &c, &amount(4.0)).unwrap();
        assert_eq!(tx.node("rp1").unwrap().unwrap().token, 6.0);
        assert_eq!(
            reduce_node_token(&mut tx, &c, &amount(7.0)),
            Err(LedgerError::TokenNotEnough)
        );
        assert_eq!(
            add_node_token(&mut tx, &c, &amount(-1.0)),
            Err(LedgerError::NegativeAmount)
        );
        set_node_token(&mut tx, &c, &amount(0.0)).unwrap();
        assert_eq!(tx.node("rp1").unwrap().unwrap().token, 0.0);
    }

    #[test]
    fn test_token_sum_must_stay_finite() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        register(&mut tx, "rp1", "RP");
        let c = ndid_ctx(Method::AddNodeToken);
        let amount = |amount| NodeTokenParams { node_id: "rp1".into(), amount };

        set_node_token(&mut tx, &c, &amount(f64::MAX)).unwrap();
        assert_eq!(
            add_node_token(&mut tx, &c, &amount(f64::MAX)),
            Err(LedgerError::TokenOverflow)
        );
        assert_eq!(tx.node("rp1").unwrap().unwrap().token, f64::MAX);
    }

    #[test]
    fn test_proxy_association_rules() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        register(&mut tx, "rp1", "RP");
        register(&mut tx, "as1", "AS");
        register(&mut tx, "proxy1", "Proxy");
        register(&mut tx, "proxy2", "Proxy");
        let c = ndid_ctx(Method::AddNodeToProxyNode);

        assert_eq!(
            add_node_to_proxy(&mut tx, &c, &proxy_params("rp1", "as1", ProxyConfig::KeyOnProxy)),
            Err(LedgerError::NotProxyNode)
        );
        assert_eq!(
            add_node_to_proxy(&mut tx, &c, &proxy_params("proxy1", "proxy1", ProxyConfig::KeyOnProxy)),
            Err(LedgerError::OwnProxy)
        );
        assert_eq!(
            add_node_to_proxy(&mut tx, &c, &proxy_params("proxy2", "proxy1", ProxyConfig::KeyOnProxy)),
            Err(LedgerError::ProxyRoleNotAllowed)
        );
        assert_eq!(
            add_node_to_proxy(&mut tx, &c, &proxy_params("rp1", "nope", ProxyConfig::KeyOnProxy)),
            Err(LedgerError::ProxyNodeNotFound)
        );

        add_node_to_proxy(&mut tx, &c, &proxy_params("rp1", "proxy1", ProxyConfig::KeyOnProxy)).unwrap();
        assert_eq!(
            add_node_to_proxy(&mut tx, &c, &proxy_params("rp1", "proxy2", ProxyConfig::KeyOnProxy)),
            Err(LedgerError::AlreadyBehindProxy)
        );

        update_node_proxy(
            &mut tx,
            &c,
            &UpdateNodeProxyNodeParams {
                node_id: "rp1".into(),
                proxy_node_id: Some("proxy2".into()),
                config: Some(ProxyConfig::KeyOnNode),
            },
        )
        .unwrap();
        let link = tx.node("rp1").unwrap().unwrap().proxy.unwrap();
        assert_eq!(link.proxy_node_id, "proxy2");
        assert_eq!(link.config, ProxyConfig::KeyOnNode);

        remove_node_from_proxy(&mut tx, &c, &NodeIdParams { node_id: "rp1".into() }).unwrap();
        assert_eq!(
            remove_node_from_proxy(&mut tx, &c, &NodeIdParams { node_id: "rp1".into() }),
            Err(LedgerError::NotBehindProxy)
        );
    }

    #[test]
    fn test_effective_key_and_addresses_follow_proxy() {
        let db = StateDb::open(Box::new(InMemoryKVStore::new())).unwrap();
        let mut tx = db.begin_tx();
        init(&mut tx);
        register(&mut tx, "idp1", "IdP");
        register(&mut tx, "proxy1", "Proxy");
        let proxy_addr = vec![MqAddress { ip: "10.1.1.1".into(), port: 9000 }];
        set_mq_addresses(
            &mut tx,
            &ctx(Method::SetMqAddresses, "proxy1", Role::Proxy),
            &SetMqAddressesParams { node_id: None, addresses: proxy_addr.clone() },
        )
        .unwrap();
        add_node_to_proxy(
            &mut tx,
            &ndid_ctx(Method::AddNodeToProxyNode),
            &proxy_params("idp1", "proxy1", ProxyConfig::KeyOnProxy),
        )
        .unwrap();

        let idp = tx.node("idp1").unwrap().unwrap();
        let proxy = tx.node("proxy1").unwrap().unwrap();
        assert_eq!(effective_key(&tx, &idp, KeyKind::Signing).unwrap(), proxy.public_key);
        assert_eq!(
            effective_key(&tx, &idp, KeyKind::Master).unwrap(),
            proxy.master_public_key
        );
        assert_eq!(effective_mq_addresses(&tx, &idp).unwrap(), proxy_addr);

        update_node_proxy(
            &mut tx,
            &ndid_ctx(Method::UpdateNodeProxyNode),
            &UpdateNodeProxyNodeParams {
                node_id: "idp1".into(),
                proxy_node_id: None,
                config: Some(ProxyConfig::KeyOnNode),
            },
        )
        .unwrap();
        let idp = tx.node("idp1").unwrap().unwrap();
        assert_eq!(effective_key(&tx, &idp, KeyKind::Signing).unwrap(), idp.public_key);
        assert_eq!(effective_mq_addresses(&tx, &idp).unwrap(), proxy_addr);
    }
}
