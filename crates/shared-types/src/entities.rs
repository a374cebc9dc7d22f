//! # Core Domain Entities
//!
//! Every record the ledger stores. Entities are persisted with a
//! deterministic binary encoding, so none of them use serde attributes that
//! change the field layout (`flatten`, `skip_serializing_if`, untagged enums).
//!
//! ## Clusters
//!
//! - **Nodes**: `Node`, `NodeKey`, `MqAddress`, `ProxyLink`
//! - **Identity**: `Namespace`, `ReferenceGroup`, `IdentityRef`, `Accessor`
//! - **Protocol**: `Request`, `IdpResponse`, `DataRequest`, `AsResponse`
//! - **Catalog**: `Service`, `ServiceApproval`, `ServiceDestination`, `ErrorCode`

use serde::{Deserialize, Serialize};
use shared_crypto::SigningAlgorithm;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: NODES
// =============================================================================

/// Network role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Network operator. Exactly one, created by `InitNDID`.
    #[serde(rename = "NDID")]
    Ndid,
    /// Relying party.
    #[serde(rename = "RP")]
    Rp,
    /// Identity provider.
    #[serde(rename = "IdP")]
    Idp,
    /// Attribute / auxiliary service.
    #[serde(rename = "AS")]
    As,
    /// Holds keys and transport for other nodes.
    #[serde(rename = "Proxy")]
    Proxy,
}

impl Role {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ndid => "NDID",
            Role::Rp => "RP",
            Role::Idp => "IdP",
            Role::As => "AS",
            Role::Proxy => "Proxy",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NDID" => Ok(Role::Ndid),
            "RP" => Ok(Role::Rp),
            "IdP" => Ok(Role::Idp),
            "AS" => Ok(Role::As),
            "Proxy" => Ok(Role::Proxy),
            _ => Err(()),
        }
    }
}

/// A PEM public key together with the algorithm the node signs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeKey {
    /// SPKI (or PKCS#1 for RSA) PEM.
    pub public_key: String,
    /// Declared signature scheme.
    pub signing_algorithm: SigningAlgorithm,
}

/// Message-queue endpoint a node receives off-ledger traffic on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqAddress {
    /// Host or IP.
    pub ip: String,
    /// TCP port.
    pub port: u16,
}

/// Where the keys of a proxied node live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyConfig {
    /// The proxy signs on behalf of the node.
    #[serde(rename = "KEY_ON_PROXY")]
    KeyOnProxy,
    /// The node keeps signing with its own keys.
    #[serde(rename = "KEY_ON_NODE")]
    KeyOnNode,
}

impl ProxyConfig {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyConfig::KeyOnProxy => "KEY_ON_PROXY",
            ProxyConfig::KeyOnNode => "KEY_ON_NODE",
        }
    }
}

/// Non-owning link from a node to the proxy that represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyLink {
    /// Id of the proxy node.
    pub proxy_node_id: String,
    /// Key location.
    pub config: ProxyConfig,
}

/// A registered network participant. Never deleted, only deactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, immutable id.
    pub node_id: String,
    /// Display name.
    pub node_name: String,
    /// Network role.
    pub role: Role,
    /// Transaction signing key.
    pub public_key: NodeKey,
    /// Key used only to authorize `UpdateNode`.
    pub master_public_key: NodeKey,
    /// Disabled nodes cannot transact.
    pub active: bool,
    /// Token balance, never negative.
    pub token: f64,
    /// IdP ceiling, 0 for other roles.
    pub max_ial: f64,
    /// IdP ceiling, 0 for other roles.
    pub max_aal: f64,
    /// Request modes an IdP can serve.
    pub supported_request_mode_list: Vec<u8>,
    /// Transport endpoints.
    pub mq_addresses: Vec<MqAddress>,
    /// Set when the node is represented by a proxy.
    pub proxy: Option<ProxyLink>,
}

impl Node {
    /// Whether the node is represented by a proxy.
    pub fn is_behind_proxy(&self) -> bool {
        self.proxy.is_some()
    }

    /// Proxy id, if any.
    pub fn proxy_node_id(&self) -> Option<&str> {
        self.proxy.as_ref().map(|p| p.proxy_node_id.as_str())
    }
}

// =============================================================================
// CLUSTER B: IDENTITY
// =============================================================================

/// Identifier namespace (e.g. a national citizen id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace key.
    pub namespace: String,
    /// Free text.
    pub description: String,
    /// Disabled namespaces accept no new identities.
    pub active: bool,
    /// Max identities of this namespace per reference group (`None` = unlimited).
    pub allowed_identifier_count_in_reference_group: Option<u32>,
    /// Max identities of this namespace per reference group with an active IdP.
    pub allowed_active_identifier_count_in_reference_group: Option<u32>,
}

/// A namespace-scoped identifier, stored as a hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityRef {
    /// Namespace key.
    pub namespace: String,
    /// Hash of the plaintext identifier.
    pub identifier_hash: String,
}

/// One IdP's view of a reference group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdpAssociation {
    /// IdP node id.
    pub node_id: String,
    /// Identity assurance level asserted by this IdP.
    pub ial: f64,
    /// Consent modes this IdP supports for the subject.
    pub mode_list: Vec<u8>,
    /// Cleared by `RevokeIdentityAssociation`.
    pub active: bool,
}

/// A key a subject authenticates with at one IdP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessor {
    /// Unique accessor id.
    pub accessor_id: String,
    /// PEM public key.
    pub accessor_public_key: String,
    /// Free-form key type label.
    pub accessor_type: String,
    /// IdP that registered the accessor.
    pub owner_idp: String,
    /// Cleared on revocation.
    pub active: bool,
    /// Height of the transaction that created it.
    pub creation_block_height: u64,
}

/// All bindings that represent one real-world subject.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceGroup {
    /// Caller-supplied unique code.
    pub reference_group_code: String,
    /// Bound identities in insertion order.
    pub identities: Vec<IdentityRef>,
    /// Per-IdP associations in insertion order.
    pub idps: Vec<IdpAssociation>,
    /// Accessors in insertion order.
    pub accessors: Vec<Accessor>,
}

impl ReferenceGroup {
    /// Empty group with the given code.
    pub fn new(reference_group_code: impl Into<String>) -> Self {
        Self {
            reference_group_code: reference_group_code.into(),
            ..Default::default()
        }
    }

    /// Association of `node_id`, active or not.
    pub fn idp(&self, node_id: &str) -> Option<&IdpAssociation> {
        self.idps.iter().find(|a| a.node_id == node_id)
    }

    /// Mutable association of `node_id`.
    pub fn idp_mut(&mut self, node_id: &str) -> Option<&mut IdpAssociation> {
        self.idps.iter_mut().find(|a| a.node_id == node_id)
    }

    /// Active association of `node_id`.
    pub fn active_idp(&self, node_id: &str) -> Option<&IdpAssociation> {
        self.idp(node_id).filter(|a| a.active)
    }

    /// Whether any IdP is still actively associated.
    pub fn has_active_idp(&self) -> bool {
        self.idps.iter().any(|a| a.active)
    }

    /// Accessor by id.
    pub fn accessor(&self, accessor_id: &str) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.accessor_id == accessor_id)
    }

    /// Mutable accessor by id.
    pub fn accessor_mut(&mut self, accessor_id: &str) -> Option<&mut Accessor> {
        self.accessors
            .iter_mut()
            .find(|a| a.accessor_id == accessor_id)
    }

    /// Number of bound identities in `namespace`.
    pub fn identity_count(&self, namespace: &str) -> usize {
        self.identities
            .iter()
            .filter(|i| i.namespace == namespace)
            .count()
    }
}

// =============================================================================
// CLUSTER C: REQUEST PROTOCOL
// =============================================================================

/// Answer an IdP gives to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    /// Subject consented and authenticated.
    #[serde(rename = "accept")]
    Accept,
    /// Subject refused or IdP could not serve.
    #[serde(rename = "reject")]
    Reject,
}

impl ResponseStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Accept => "accept",
            ResponseStatus::Reject => "reject",
        }
    }
}

impl FromStr for ResponseStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(ResponseStatus::Accept),
            "reject" => Ok(ResponseStatus::Reject),
            _ => Err(()),
        }
    }
}

/// An IdP's response, plus the requester's validity tally set on close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdpResponse {
    /// Responding IdP.
    pub idp_id: String,
    /// Asserted IAL (0 on reject).
    pub ial: f64,
    /// Asserted AAL (0 on reject).
    pub aal: f64,
    /// Accept or reject.
    pub status: ResponseStatus,
    /// Opaque signature over the request message.
    pub signature: String,
    /// Registered idp error code, reject only.
    pub error_code: Option<i32>,
    /// Requester's judgment of the IAL, recorded on close.
    pub valid_ial: Option<bool>,
    /// Requester's judgment of the signature, recorded on close.
    pub valid_signature: Option<bool>,
}

/// An AS data response inside a data request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsResponse {
    /// Responding AS.
    pub as_id: String,
    /// Opaque signature over the data.
    pub signature: String,
    /// Registered as error code when the AS could not serve.
    pub error_code: Option<i32>,
    /// Set by the requester with `SetDataReceived`.
    pub received_data: bool,
}

/// Data asked of AS nodes as part of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    /// Requested service.
    pub service_id: String,
    /// Target AS nodes (empty = any).
    pub as_id_list: Vec<String>,
    /// Minimum number of AS answers wanted.
    pub min_as: u32,
    /// Hash of the off-ledger request parameters.
    pub request_params_hash: String,
    /// Collected AS answers.
    pub response_list: Vec<AsResponse>,
}

/// A verification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Caller-supplied unique id.
    pub request_id: String,
    /// Creating RP or IdP.
    pub requester_node_id: String,
    /// Minimum number of IdP answers wanted.
    pub min_idp: u32,
    /// Minimum IAL.
    pub min_ial: f64,
    /// Minimum AAL.
    pub min_aal: f64,
    /// Consent mode.
    pub mode: u8,
    /// Purpose tag; gated mutations match it against their method name.
    pub purpose: String,
    /// Ledger heights until automatic time-out (0 = none).
    pub request_timeout: u64,
    /// Target IdPs (empty = any qualifying IdP).
    pub idp_id_list: Vec<String>,
    /// AS data requests.
    pub data_request_list: Vec<DataRequest>,
    /// Hash of the off-ledger request message.
    pub request_message_hash: String,
    /// Collected IdP answers.
    pub response_list: Vec<IdpResponse>,
    /// Set by `CloseRequest`.
    pub closed: bool,
    /// Set by `TimeOutRequest`.
    pub timed_out: bool,
    /// Height of the creating transaction.
    pub creation_block_height: u64,
}

impl Request {
    /// Timed out explicitly, or implicitly once `height` passes the deadline.
    pub fn is_timed_out_at(&self, height: u64) -> bool {
        self.timed_out
            || (self.request_timeout > 0
                && height > self.creation_block_height.saturating_add(self.request_timeout))
    }

    /// Response of `idp_id`, if it answered.
    pub fn response_from(&self, idp_id: &str) -> Option<&IdpResponse> {
        self.response_list.iter().find(|r| r.idp_id == idp_id)
    }

    /// Data request for `service_id`.
    pub fn data_request(&self, service_id: &str) -> Option<&DataRequest> {
        self.data_request_list
            .iter()
            .find(|d| d.service_id == service_id)
    }
}

// =============================================================================
// CLUSTER D: CATALOG
// =============================================================================

/// A data service AS nodes can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique id.
    pub service_id: String,
    /// Display name.
    pub service_name: String,
    /// Schema reference.
    pub data_schema: String,
    /// Schema version.
    pub data_schema_version: String,
    /// Disabled services are hidden.
    pub active: bool,
}

/// NDID pre-authorization for an AS to offer a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceApproval {
    /// Service id.
    pub service_id: String,
    /// AS node id.
    pub node_id: String,
    /// Cleared by `DisableServiceDestinationByNDID`.
    pub active: bool,
}

/// An AS's offer for one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDestination {
    /// Service id.
    pub service_id: String,
    /// AS node id.
    pub node_id: String,
    /// Minimum IAL the AS serves.
    pub min_ial: f64,
    /// Minimum AAL the AS serves.
    pub min_aal: f64,
    /// Namespaces the AS accepts.
    pub supported_namespace_list: Vec<String>,
    /// Toggled by the AS.
    pub active: bool,
    /// Mirrors a disabled approval.
    pub suspended: bool,
}

/// Who an error code is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCodeType {
    /// IdP rejection codes.
    #[serde(rename = "idp")]
    Idp,
    /// AS rejection codes.
    #[serde(rename = "as")]
    As,
}

impl ErrorCodeType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCodeType::Idp => "idp",
            ErrorCodeType::As => "as",
        }
    }
}

impl FromStr for ErrorCodeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idp" => Ok(ErrorCodeType::Idp),
            "as" => Ok(ErrorCodeType::As),
            _ => Err(()),
        }
    }
}

/// Shared rejection vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode {
    /// Numeric code.
    pub error_code: i32,
    /// Scope.
    pub error_type: ErrorCodeType,
    /// Human text.
    pub description: String,
    /// Whether the rejection ends the request for the caller.
    pub fatal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(timeout: u64) -> Request {
        Request {
            request_id: "r1".into(),
            requester_node_id: "rp1".into(),
            min_idp: 1,
            min_ial: 1.1,
            min_aal: 1.0,
            mode: 2,
            purpose: String::new(),
            request_timeout: timeout,
            idp_id_list: vec![],
            data_request_list: vec![],
            request_message_hash: "h".into(),
            response_list: vec![],
            closed: false,
            timed_out: false,
            creation_block_height: 10,
        }
    }

    #[test]
    fn test_request_timeout_by_height() {
        let req = request(5);
        assert!(!req.is_timed_out_at(15));
        assert!(req.is_timed_out_at(16));
    }

    #[test]
    fn test_zero_timeout_never_expires() {
        let req = request(0);
        assert!(!req.is_timed_out_at(u64::MAX));
    }

    #[test]
    fn test_role_wire_names() {
        for role in [Role::Ndid, Role::Rp, Role::Idp, Role::As, Role::Proxy] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
        assert!("idp".parse::<Role>().is_err());
    }

    #[test]
    fn test_reference_group_binary_encoding_is_stable() {
        let mut group = ReferenceGroup::new("ref-1");
        group.identities.push(IdentityRef {
            namespace: "cid".into(),
            identifier_hash: "abc".into(),
        });
        let a = bincode::serialize(&group).unwrap();
        let b = bincode::serialize(&group.clone()).unwrap();
        assert_eq!(a, b);
        let back: ReferenceGroup = bincode::deserialize(&a).unwrap();
        assert_eq!(back.identity_count("cid"), 1);
    }

    #[test]
    fn test_active_idp_filters_revoked() {
        let mut group = ReferenceGroup::new("ref-1");
        group.idps.push(IdpAssociation {
            node_id: "idp1".into(),
            ial: 2.3,
            mode_list: vec![2],
            active: false,
        });
        assert!(group.idp("idp1").is_some());
        assert!(group.active_idp("idp1").is_none());
        assert!(!group.has_active_idp());
    }
}
