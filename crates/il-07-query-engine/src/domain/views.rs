//! # Query Views
//!
//! JSON shapes returned by queries. Levels go through
//! [`serialize_level`] so whole values render as integers. `Default` of a
//! view is what a "not found" answer carries.

use serde::{Serialize, Serializer};
use shared_types::levels::serialize_level;
use shared_types::{
    AsResponse, DataRequest, ErrorCode, IdpResponse, MqAddress, Namespace, Node, NodeKey, Request,
    Service, ServiceDestination,
};

fn level_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(level) => serialize_level(level, serializer),
        None => serializer.serialize_none(),
    }
}

// =============================================================================
// NODES
// =============================================================================

/// `GetNodePublicKey` / `GetNodeMasterPublicKey`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyView {
    pub public_key: String,
    pub algorithm: String,
}

impl From<&NodeKey> for KeyView {
    fn from(key: &NodeKey) -> Self {
        Self {
            public_key: key.public_key.clone(),
            algorithm: key.signing_algorithm.as_str().to_string(),
        }
    }
}

/// IdP-only node attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdpCapabilities {
    #[serde(serialize_with = "serialize_level")]
    pub max_ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub max_aal: f64,
    pub supported_request_mode_list: Vec<u8>,
}

impl IdpCapabilities {
    /// `Some` for IdP nodes only.
    pub fn of(node: &Node) -> Option<Self> {
        (node.role == shared_types::Role::Idp).then(|| Self {
            max_ial: node.max_ial,
            max_aal: node.max_aal,
            supported_request_mode_list: node.supported_request_mode_list.clone(),
        })
    }
}

/// The proxy a node is behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProxyView {
    pub node_id: String,
    pub node_name: String,
    pub public_key: String,
    pub algorithm: String,
    pub master_public_key: String,
    pub master_algorithm: String,
    pub mq: Vec<MqAddress>,
    pub config: String,
}

/// `GetNodeInfo`. Keys and `mq` are the node's own; a proxied node also
/// carries its proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeInfoView {
    pub node_name: String,
    pub role: String,
    pub public_key: String,
    pub algorithm: String,
    pub master_public_key: String,
    pub master_algorithm: String,
    pub active: bool,
    pub mq: Vec<MqAddress>,
    #[serde(flatten)]
    pub idp: Option<IdpCapabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyView>,
}

impl NodeInfoView {
    pub fn new(node: &Node, proxy: Option<ProxyView>) -> Self {
        Self {
            node_name: node.node_name.clone(),
            role: node.role.as_str().to_string(),
            public_key: node.public_key.public_key.clone(),
            algorithm: node.public_key.signing_algorithm.as_str().to_string(),
            master_public_key: node.master_public_key.public_key.clone(),
            master_algorithm: node.master_public_key.signing_algorithm.as_str().to_string(),
            active: node.active,
            mq: node.mq_addresses.clone(),
            idp: IdpCapabilities::of(node),
            proxy,
        }
    }
}

/// `GetNodeIDList`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeIdListView {
    pub node_id_list: Vec<String>,
}

/// One entry of `GetNodesBehindProxyNode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehindProxyView {
    pub node_id: String,
    pub node_name: String,
    pub role: String,
    pub public_key: String,
    pub algorithm: String,
    pub master_public_key: String,
    pub master_algorithm: String,
    pub config: String,
    #[serde(flatten)]
    pub idp: Option<IdpCapabilities>,
}

/// `GetNodesBehindProxyNode`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BehindProxyListView {
    pub nodes: Vec<BehindProxyView>,
}

/// `GetNodeToken`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenView {
    pub amount: f64,
}

/// One entry of `GetIdpNodes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdpNodeView {
    pub node_id: String,
    pub node_name: String,
    #[serde(serialize_with = "serialize_level")]
    pub max_ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub max_aal: f64,
    /// Association modes when a group was named, node modes otherwise.
    pub mode_list: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "level_opt")]
    pub ial: Option<f64>,
}

/// `GetIdpNodes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdpNodesView {
    pub node: Vec<IdpNodeView>,
}

/// One entry of `GetIdpNodesInfo`: transport and key, resolved through
/// the proxy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdpNodeInfoView {
    pub node_id: String,
    pub name: String,
    #[serde(serialize_with = "serialize_level")]
    pub max_ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub max_aal: f64,
    pub mode_list: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "level_opt")]
    pub ial: Option<f64>,
    pub public_key: String,
    pub algorithm: String,
    pub mq: Vec<MqAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyView>,
}

/// `GetIdpNodesInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdpNodesInfoView {
    pub node: Vec<IdpNodeInfoView>,
}

// =============================================================================
// SERVICES
// =============================================================================

/// One entry of `GetAsNodesByServiceId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsNodeView {
    pub node_id: String,
    pub node_name: String,
    #[serde(serialize_with = "serialize_level")]
    pub min_ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub min_aal: f64,
    pub supported_namespace_list: Vec<String>,
}

/// `GetAsNodesByServiceId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AsNodesView {
    pub node: Vec<AsNodeView>,
}

/// One entry of `GetAsNodesInfoByServiceId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsNodeInfoView {
    pub node_id: String,
    pub name: String,
    #[serde(serialize_with = "serialize_level")]
    pub min_ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub min_aal: f64,
    pub supported_namespace_list: Vec<String>,
    pub public_key: String,
    pub algorithm: String,
    pub mq: Vec<MqAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyView>,
}

/// `GetAsNodesInfoByServiceId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AsNodesInfoView {
    pub service_id: String,
    pub node: Vec<AsNodeInfoView>,
}

/// One entry of `GetServicesByAsID`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsServiceView {
    pub service_id: String,
    #[serde(serialize_with = "serialize_level")]
    pub min_ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub min_aal: f64,
    pub supported_namespace_list: Vec<String>,
    pub active: bool,
    pub suspended: bool,
}

impl From<&ServiceDestination> for AsServiceView {
    fn from(destination: &ServiceDestination) -> Self {
        Self {
            service_id: destination.service_id.clone(),
            min_ial: destination.min_ial,
            min_aal: destination.min_aal,
            supported_namespace_list: destination.supported_namespace_list.clone(),
            active: destination.active,
            suspended: destination.suspended,
        }
    }
}

/// `GetServicesByAsID`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AsServicesView {
    pub services: Vec<AsServiceView>,
}

/// `GetServiceDetail`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceDetailView {
    pub service_id: String,
    pub service_name: String,
    pub data_schema: String,
    pub data_schema_version: String,
    pub active: bool,
}

impl From<Service> for ServiceDetailView {
    fn from(service: Service) -> Self {
        Self {
            service_id: service.service_id,
            service_name: service.service_name,
            data_schema: service.data_schema,
            data_schema_version: service.data_schema_version,
            active: service.active,
        }
    }
}

/// One entry of `GetServiceList`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummaryView {
    pub service_id: String,
    pub service_name: String,
    pub active: bool,
}

/// One entry of `GetErrorCodeList`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorCodeView {
    pub error_code: i32,
    pub description: String,
    pub fatal: bool,
}

impl From<ErrorCode> for ErrorCodeView {
    fn from(code: ErrorCode) -> Self {
        Self {
            error_code: code.error_code,
            description: code.description,
            fatal: code.fatal,
        }
    }
}

// =============================================================================
// NAMESPACES & IDENTITIES
// =============================================================================

/// One entry of `GetNamespaceList`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceView {
    pub namespace: String,
    pub description: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_identifier_count_in_reference_group: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_active_identifier_count_in_reference_group: Option<u32>,
}

impl From<Namespace> for NamespaceView {
    fn from(namespace: Namespace) -> Self {
        Self {
            namespace: namespace.namespace,
            description: namespace.description,
            active: namespace.active,
            allowed_identifier_count_in_reference_group: namespace
                .allowed_identifier_count_in_reference_group,
            allowed_active_identifier_count_in_reference_group: namespace
                .allowed_active_identifier_count_in_reference_group,
        }
    }
}

/// `GetIdentityInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentityInfoView {
    #[serde(serialize_with = "serialize_level")]
    pub ial: f64,
    pub mode_list: Vec<u8>,
}

/// `GetReferenceGroupCode` / `GetReferenceGroupCodeByAccessorID`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferenceGroupCodeView {
    pub reference_group_code: String,
}

/// `CheckExistingIdentity`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExistView {
    pub exist: bool,
}

/// `GetAccessorKey`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccessorKeyView {
    pub accessor_public_key: String,
    pub active: bool,
}

/// `GetAccessorOwner`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccessorOwnerView {
    pub node_id: String,
}

/// `GetAllowedModeList`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllowedModeListView {
    pub allowed_mode_list: Vec<u8>,
}

/// `GetAllowedMinIalForRegisterIdentityAtFirstIdp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MinIalView {
    #[serde(serialize_with = "serialize_level")]
    pub min_ial: f64,
}

// =============================================================================
// REQUESTS
// =============================================================================

/// `GetRequest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestView {
    pub closed: bool,
    pub timed_out: bool,
    pub mode: u8,
    pub request_message_hash: String,
    pub requester_node_id: String,
    pub creation_block_height: u64,
}

impl RequestView {
    pub fn new(request: &Request, height: u64) -> Self {
        Self {
            closed: request.closed,
            timed_out: request.is_timed_out_at(height),
            mode: request.mode,
            request_message_hash: request.request_message_hash.clone(),
            requester_node_id: request.requester_node_id.clone(),
            creation_block_height: request.creation_block_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdpResponseView {
    pub idp_id: String,
    #[serde(serialize_with = "serialize_level")]
    pub ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub aal: f64,
    pub status: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_ial: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_signature: Option<bool>,
}

impl From<&IdpResponse> for IdpResponseView {
    fn from(response: &IdpResponse) -> Self {
        Self {
            idp_id: response.idp_id.clone(),
            ial: response.ial,
            aal: response.aal,
            status: response.status.as_str().to_string(),
            signature: response.signature.clone(),
            error_code: response.error_code,
            valid_ial: response.valid_ial,
            valid_signature: response.valid_signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsResponseView {
    pub as_id: String,
    pub signed: bool,
    pub received_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
}

impl From<&AsResponse> for AsResponseView {
    fn from(response: &AsResponse) -> Self {
        Self {
            as_id: response.as_id.clone(),
            signed: !response.signature.is_empty(),
            received_data: response.received_data,
            error_code: response.error_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRequestView {
    pub service_id: String,
    pub as_id_list: Vec<String>,
    pub min_as: u32,
    pub request_params_hash: String,
    pub response_list: Vec<AsResponseView>,
}

impl From<&DataRequest> for DataRequestView {
    fn from(data_request: &DataRequest) -> Self {
        Self {
            service_id: data_request.service_id.clone(),
            as_id_list: data_request.as_id_list.clone(),
            min_as: data_request.min_as,
            request_params_hash: data_request.request_params_hash.clone(),
            response_list: data_request
                .response_list
                .iter()
                .map(AsResponseView::from)
                .collect(),
        }
    }
}

/// `GetRequestDetail`. `timed_out` includes the implicit height deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestDetailView {
    pub request_id: String,
    pub requester_node_id: String,
    pub min_idp: u32,
    #[serde(serialize_with = "serialize_level")]
    pub min_ial: f64,
    #[serde(serialize_with = "serialize_level")]
    pub min_aal: f64,
    pub request_timeout: u64,
    pub idp_id_list: Vec<String>,
    pub data_request_list: Vec<DataRequestView>,
    pub request_message_hash: String,
    pub response_list: Vec<IdpResponseView>,
    pub closed: bool,
    pub timed_out: bool,
    pub mode: u8,
    pub purpose: String,
    pub creation_block_height: u64,
}

impl RequestDetailView {
    pub fn new(request: &Request, height: u64) -> Self {
        Self {
            request_id: request.request_id.clone(),
            requester_node_id: request.requester_node_id.clone(),
            min_idp: request.min_idp,
            min_ial: request.min_ial,
            min_aal: request.min_aal,
            request_timeout: request.request_timeout,
            idp_id_list: request.idp_id_list.clone(),
            data_request_list: request
                .data_request_list
                .iter()
                .map(DataRequestView::from)
                .collect(),
            request_message_hash: request.request_message_hash.clone(),
            response_list: request
                .response_list
                .iter()
                .map(IdpResponseView::from)
                .collect(),
            closed: request.closed,
            timed_out: request.is_timed_out_at(height),
            mode: request.mode,
            purpose: request.purpose.clone(),
            creation_block_height: request.creation_block_height,
        }
    }
}

/// `GetDataSignature`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataSignatureView {
    pub signature: String,
}

// =============================================================================
// CHAIN
// =============================================================================

/// `GetChainInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChainInfoView {
    pub height: u64,
    pub state_root: String,
}
