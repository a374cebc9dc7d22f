//! # Query Parameters
//!
//! One struct per parameter shape. Every field defaults, so `{}` or an
//! empty string is a valid parameter object for every query.

use serde::Deserialize;
use shared_crypto::Hash;

/// `{node_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeIdQuery {
    pub node_id: String,
}

/// `GetNodeIDList`: empty `role` lists every node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeIdListQuery {
    pub role: String,
}

/// `GetNodesBehindProxyNode`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxyNodeQuery {
    pub proxy_node_id: String,
}

/// `GetIdpNodes` / `GetIdpNodesInfo`.
///
/// With a reference group (by code or identity), only IdPs with an active
/// association qualify, and their association's IAL and modes are used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdpNodesQuery {
    pub reference_group_code: String,
    pub identity_namespace: String,
    pub identity_identifier_hash: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub node_id_list: Vec<String>,
    pub supported_request_mode_list: Vec<u8>,
}

impl IdpNodesQuery {
    /// Whether a reference group narrows the result.
    pub fn names_group(&self) -> bool {
        !self.reference_group_code.is_empty()
            || !self.identity_namespace.is_empty()
            || !self.identity_identifier_hash.is_empty()
    }
}

/// `{service_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceIdQuery {
    pub service_id: String,
}

/// `GetAsNodesInfoByServiceId`: empty `node_id_list` means every AS.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AsNodesInfoQuery {
    pub service_id: String,
    pub node_id_list: Vec<String>,
}

/// `GetServicesByAsID`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AsIdQuery {
    pub as_id: String,
}

/// A reference group named by code or by one identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentityQuery {
    pub reference_group_code: String,
    pub identity_namespace: String,
    pub identity_identifier_hash: String,
}

/// `GetIdentityInfo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentityInfoQuery {
    pub reference_group_code: String,
    pub identity_namespace: String,
    pub identity_identifier_hash: String,
    pub node_id: String,
}

/// `{accessor_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessorQuery {
    pub accessor_id: String,
}

/// `{request_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestQuery {
    pub request_id: String,
}

/// `GetDataSignature`: the signature `node_id` gave for `service_id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataSignatureQuery {
    pub node_id: String,
    pub request_id: String,
    pub service_id: String,
}

/// `GetAllowedModeList`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PurposeQuery {
    pub purpose: String,
}

/// `GetErrorCodeList`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorCodeListQuery {
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Queries without parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoParams {}

/// Chain position the committed state corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainInfo {
    /// Last committed height.
    pub height: u64,
    /// Root of that commit.
    pub state_root: Hash,
}
