//! # Transaction Parameters
//!
//! One parameter struct per method, selected by the method tag. Unknown
//! JSON fields are ignored; a missing required field fails decoding, which
//! the dispatcher reports as an admission error naming the method.

use crate::entities::{IdentityRef, MqAddress, ProxyConfig};
use crate::methods::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_crypto::SigningAlgorithm;

// =============================================================================
// NODE & PROXY
// =============================================================================

/// `InitNDID`: bootstrap the network operator node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitNdidParams {
    pub node_id: String,
    #[serde(default)]
    pub node_name: String,
    pub public_key: String,
    pub signing_algorithm: SigningAlgorithm,
    pub master_public_key: String,
    pub master_signing_algorithm: SigningAlgorithm,
}

/// `RegisterNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterNodeParams {
    pub node_id: String,
    #[serde(default)]
    pub node_name: String,
    /// Role name, checked by the handler.
    pub role: String,
    pub public_key: String,
    pub signing_algorithm: SigningAlgorithm,
    pub master_public_key: String,
    pub master_signing_algorithm: SigningAlgorithm,
    #[serde(default)]
    pub max_ial: f64,
    #[serde(default)]
    pub max_aal: f64,
    #[serde(default)]
    pub supported_request_mode_list: Vec<u8>,
}

/// `UpdateNode`: self-service key rotation, verified with the master key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateNodeParams {
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub signing_algorithm: Option<SigningAlgorithm>,
    #[serde(default)]
    pub master_public_key: Option<String>,
    #[serde(default)]
    pub master_signing_algorithm: Option<SigningAlgorithm>,
}

/// `UpdateNodeByNDID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNodeByNdidParams {
    pub node_id: String,
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub max_ial: Option<f64>,
    #[serde(default)]
    pub max_aal: Option<f64>,
    #[serde(default)]
    pub supported_request_mode_list: Option<Vec<u8>>,
}

/// `SetMqAddresses`. `node_id` lets a proxy set addresses for a node it represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMqAddressesParams {
    #[serde(default)]
    pub node_id: Option<String>,
    pub addresses: Vec<MqAddress>,
}

/// `DisableNode` / `EnableNode` / `RemoveNodeFromProxyNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeIdParams {
    pub node_id: String,
}

/// Token operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTokenParams {
    pub node_id: String,
    pub amount: f64,
}

/// `AddNodeToProxyNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddNodeToProxyNodeParams {
    pub node_id: String,
    pub proxy_node_id: String,
    pub config: ProxyConfig,
}

/// `UpdateNodeProxyNode`: move to another proxy and/or change key location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNodeProxyNodeParams {
    pub node_id: String,
    #[serde(default)]
    pub proxy_node_id: Option<String>,
    #[serde(default)]
    pub config: Option<ProxyConfig>,
}

// =============================================================================
// NAMESPACE & GOVERNANCE
// =============================================================================

/// `AddNamespace`. Negative ceilings mean unlimited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddNamespaceParams {
    pub namespace: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub allowed_identifier_count_in_reference_group: Option<i64>,
    #[serde(default)]
    pub allowed_active_identifier_count_in_reference_group: Option<i64>,
}

/// `UpdateNamespace`. Absent fields are left alone; a negative ceiling clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNamespaceParams {
    pub namespace: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub allowed_identifier_count_in_reference_group: Option<i64>,
    #[serde(default)]
    pub allowed_active_identifier_count_in_reference_group: Option<i64>,
}

/// `DisableNamespace` / `EnableNamespace`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceParams {
    pub namespace: String,
}

/// `SetAllowedModeList`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAllowedModeListParams {
    #[serde(default)]
    pub purpose: String,
    pub allowed_mode_list: Vec<u8>,
}

/// `SetAllowedMinIalForRegisterIdentityAtFirstIdp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAllowedMinIalParams {
    pub min_ial: f64,
}

/// `SetLastBlock`. `-1` re-enables the chain indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLastBlockParams {
    pub block_height: i64,
}

// =============================================================================
// IDENTITY
// =============================================================================

/// `RegisterIdentity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterIdentityParams {
    #[serde(default)]
    pub reference_group_code: String,
    #[serde(default)]
    pub new_identity_list: Vec<IdentityRef>,
    pub ial: f64,
    pub mode_list: Vec<u8>,
    pub accessor_id: String,
    pub accessor_public_key: String,
    #[serde(default)]
    pub accessor_type: String,
}

/// `AddIdentity` (gated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddIdentityParams {
    #[serde(default)]
    pub reference_group_code: String,
    #[serde(default)]
    pub new_identity_list: Vec<IdentityRef>,
    #[serde(default)]
    pub request_id: String,
}

/// `UpdateIdentity`: caller's own IAL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateIdentityParams {
    #[serde(default)]
    pub reference_group_code: String,
    #[serde(default)]
    pub identifier_namespace: String,
    #[serde(default)]
    pub identifier_hash: String,
    pub ial: f64,
}

/// `UpdateIdentityModeList`: caller's own modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateIdentityModeListParams {
    #[serde(default)]
    pub reference_group_code: String,
    #[serde(default)]
    pub identifier_namespace: String,
    #[serde(default)]
    pub identifier_hash: String,
    pub mode_list: Vec<u8>,
}

/// `AddAccessorMethod` (gated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddAccessorParams {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub reference_group_code: String,
    #[serde(default)]
    pub identifier_namespace: String,
    #[serde(default)]
    pub identifier_hash: String,
    pub accessor_id: String,
    pub accessor_public_key: String,
    #[serde(default)]
    pub accessor_type: String,
}

/// `RevokeAccessor` (gated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevokeAccessorParams {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub accessor_id_list: Vec<String>,
}

/// `RevokeAndAddAccessor` (gated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevokeAndAddAccessorParams {
    #[serde(default)]
    pub request_id: String,
    pub revoking_accessor_id: String,
    pub accessor_id: String,
    pub accessor_public_key: String,
    #[serde(default)]
    pub accessor_type: String,
}

/// `RevokeIdentityAssociation` (gated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevokeIdentityAssociationParams {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub reference_group_code: String,
    #[serde(default)]
    pub identifier_namespace: String,
    #[serde(default)]
    pub identifier_hash: String,
}

// =============================================================================
// REQUEST PROTOCOL
// =============================================================================

/// One data request inside `CreateRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRequestParams {
    pub service_id: String,
    #[serde(default)]
    pub as_id_list: Vec<String>,
    #[serde(default)]
    pub min_as: i64,
    #[serde(default)]
    pub request_params_hash: String,
}

/// `CreateRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequestParams {
    #[serde(default)]
    pub request_id: String,
    pub min_idp: i64,
    pub min_ial: f64,
    pub min_aal: f64,
    #[serde(default)]
    pub request_timeout: u64,
    #[serde(default)]
    pub idp_id_list: Vec<String>,
    #[serde(default)]
    pub data_request_list: Vec<DataRequestParams>,
    #[serde(default)]
    pub request_message_hash: String,
    pub mode: u8,
    #[serde(default)]
    pub purpose: String,
}

/// `CreateIdpResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIdpResponseParams {
    pub request_id: String,
    #[serde(default)]
    pub ial: f64,
    #[serde(default)]
    pub aal: f64,
    /// "accept" or "reject", checked by the handler.
    pub status: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub error_code: Option<i32>,
}

/// `CreateAsResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAsResponseParams {
    pub request_id: String,
    pub service_id: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub error_code: Option<i32>,
}

/// `SetDataReceived`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDataReceivedParams {
    pub request_id: String,
    pub service_id: String,
    pub as_id: String,
}

/// Requester's judgment of one IdP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseValid {
    pub idp_id: String,
    #[serde(default)]
    pub valid_ial: Option<bool>,
    #[serde(default)]
    pub valid_signature: Option<bool>,
}

/// `CloseRequest` / `TimeOutRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishRequestParams {
    pub request_id: String,
    #[serde(default)]
    pub response_valid_list: Vec<ResponseValid>,
}

// =============================================================================
// SERVICES & ERROR CODES
// =============================================================================

/// `AddService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddServiceParams {
    pub service_id: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub data_schema: String,
    #[serde(default)]
    pub data_schema_version: String,
}

/// `UpdateService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateServiceParams {
    pub service_id: String,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub data_schema: Option<String>,
    #[serde(default)]
    pub data_schema_version: Option<String>,
}

/// `DisableService` / `EnableService` and the AS destination toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceIdParams {
    pub service_id: String,
}

/// NDID approval operations on `(service_id, node_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceApprovalParams {
    pub service_id: String,
    pub node_id: String,
}

/// `RegisterServiceDestination`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterServiceDestinationParams {
    pub service_id: String,
    pub min_ial: f64,
    pub min_aal: f64,
    #[serde(default)]
    pub supported_namespace_list: Vec<String>,
}

/// `UpdateServiceDestination`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateServiceDestinationParams {
    pub service_id: String,
    #[serde(default)]
    pub min_ial: Option<f64>,
    #[serde(default)]
    pub min_aal: Option<f64>,
    #[serde(default)]
    pub supported_namespace_list: Option<Vec<String>>,
}

/// `AddErrorCode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddErrorCodeParams {
    pub error_code: i32,
    #[serde(default)]
    pub description: String,
    /// "idp" or "as", checked by the handler.
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub fatal: bool,
}

/// `RemoveErrorCode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveErrorCodeParams {
    pub error_code: i32,
    #[serde(rename = "type")]
    pub error_type: String,
}

// =============================================================================
// TAGGED UNION
// =============================================================================

/// Decoded parameters, one variant per method.
#[derive(Debug, Clone, PartialEq)]
pub enum TxParams {
    InitNdid(InitNdidParams),
    RegisterNode(RegisterNodeParams),
    UpdateNode(UpdateNodeParams),
    UpdateNodeByNdid(UpdateNodeByNdidParams),
    SetMqAddresses(SetMqAddressesParams),
    DisableNode(NodeIdParams),
    EnableNode(NodeIdParams),
    AddNodeToken(NodeTokenParams),
    ReduceNodeToken(NodeTokenParams),
    SetNodeToken(NodeTokenParams),
    AddNodeToProxyNode(AddNodeToProxyNodeParams),
    UpdateNodeProxyNode(UpdateNodeProxyNodeParams),
    RemoveNodeFromProxyNode(NodeIdParams),

    AddNamespace(AddNamespaceParams),
    UpdateNamespace(UpdateNamespaceParams),
    DisableNamespace(NamespaceParams),
    EnableNamespace(NamespaceParams),
    SetAllowedModeList(SetAllowedModeListParams),
    SetAllowedMinIalForRegisterIdentityAtFirstIdp(SetAllowedMinIalParams),

    RegisterIdentity(RegisterIdentityParams),
    AddIdentity(AddIdentityParams),
    UpdateIdentity(UpdateIdentityParams),
    UpdateIdentityModeList(UpdateIdentityModeListParams),
    AddAccessorMethod(AddAccessorParams),
    RevokeAccessor(RevokeAccessorParams),
    RevokeAndAddAccessor(RevokeAndAddAccessorParams),
    RevokeIdentityAssociation(RevokeIdentityAssociationParams),

    CreateRequest(CreateRequestParams),
    CreateIdpResponse(CreateIdpResponseParams),
    CreateAsResponse(CreateAsResponseParams),
    SetDataReceived(SetDataReceivedParams),
    CloseRequest(FinishRequestParams),
    TimeOutRequest(FinishRequestParams),

    AddService(AddServiceParams),
    UpdateService(UpdateServiceParams),
    DisableService(ServiceIdParams),
    EnableService(ServiceIdParams),
    RegisterServiceDestinationByNdid(ServiceApprovalParams),
    DisableServiceDestinationByNdid(ServiceApprovalParams),
    EnableServiceDestinationByNdid(ServiceApprovalParams),
    RegisterServiceDestination(RegisterServiceDestinationParams),
    UpdateServiceDestination(UpdateServiceDestinationParams),
    DisableServiceDestination(ServiceIdParams),
    EnableServiceDestination(ServiceIdParams),

    AddErrorCode(AddErrorCodeParams),
    RemoveErrorCode(RemoveErrorCodeParams),

    SetLastBlock(SetLastBlockParams),
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}

impl TxParams {
    /// Decode `json` into the parameter type of `method`.
    pub fn decode(method: Method, json: &str) -> Result<Self, serde_json::Error> {
        let params = match method {
            Method::InitNdid => TxParams::InitNdid(parse(json)?),
            Method::RegisterNode => TxParams::RegisterNode(parse(json)?),
            Method::UpdateNode => TxParams::UpdateNode(parse(json)?),
            Method::UpdateNodeByNdid => TxParams::UpdateNodeByNdid(parse(json)?),
            Method::SetMqAddresses => TxParams::SetMqAddresses(parse(json)?),
            Method::DisableNode => TxParams::DisableNode(parse(json)?),
            Method::EnableNode => TxParams::EnableNode(parse(json)?),
            Method::AddNodeToken => TxParams::AddNodeToken(parse(json)?),
            Method::ReduceNodeToken => TxParams::ReduceNodeToken(parse(json)?),
            Method::SetNodeToken => TxParams::SetNodeToken(parse(json)?),
            Method::AddNodeToProxyNode => TxParams::AddNodeToProxyNode(parse(json)?),
            Method::UpdateNodeProxyNode => TxParams::UpdateNodeProxyNode(parse(json)?),
            Method::RemoveNodeFromProxyNode => TxParams::RemoveNodeFromProxyNode(parse(json)?),

            Method::AddNamespace => TxParams::AddNamespace(parse(json)?),
            Method::UpdateNamespace => TxParams::UpdateNamespace(parse(json)?),
            Method::DisableNamespace => TxParams::DisableNamespace(parse(json)?),
            Method::EnableNamespace => TxParams::EnableNamespace(parse(json)?),
            Method::SetAllowedModeList => TxParams::SetAllowedModeList(parse(json)?),
            Method::SetAllowedMinIalForRegisterIdentityAtFirstIdp => {
                TxParams::SetAllowedMinIalForRegisterIdentityAtFirstIdp(parse(json)?)
            }

            Method::RegisterIdentity => TxParams::RegisterIdentity(parse(json)?),
            Method::AddIdentity => TxParams::AddIdentity(parse(json)?),
            Method::UpdateIdentity => TxParams::UpdateIdentity(parse(json)?),
            Method::UpdateIdentityModeList => TxParams::UpdateIdentityModeList(parse(json)?),
            Method::AddAccessorMethod => TxParams::AddAccessorMethod(parse(json)?),
            Method::RevokeAccessor => TxParams::RevokeAccessor(parse(json)?),
            Method::RevokeAndAddAccessor => TxParams::RevokeAndAddAccessor(parse(json)?),
            Method::RevokeIdentityAssociation => {
                TxParams::RevokeIdentityAssociation(parse(json)?)
            }

            Method::CreateRequest => TxParams::CreateRequest(parse(json)?),
            Method::CreateIdpResponse => TxParams::CreateIdpResponse(parse(json)?),
            Method::CreateAsResponse => TxParams::CreateAsResponse(parse(json)?),
            Method::SetDataReceived => TxParams::SetDataReceived(parse(json)?),
            Method::CloseRequest => TxParams::CloseRequest(parse(json)?),
            Method::TimeOutRequest => TxParams::TimeOutRequest(parse(json)?),

            Method::AddService => TxParams::AddService(parse(json)?),
            Method::UpdateService => TxParams::UpdateService(parse(json)?),
            Method::DisableService => TxParams::DisableService(parse(json)?),
            Method::EnableService => TxParams::EnableService(parse(json)?),
            Method::RegisterServiceDestinationByNdid => {
                TxParams::RegisterServiceDestinationByNdid(parse(json)?)
            }
            Method::DisableServiceDestinationByNdid => {
                TxParams::DisableServiceDestinationByNdid(parse(json)?)
            }
            Method::EnableServiceDestinationByNdid => {
                TxParams::EnableServiceDestinationByNdid(parse(json)?)
            }
            Method::RegisterServiceDestination => {
                TxParams::RegisterServiceDestination(parse(json)?)
            }
            Method::UpdateServiceDestination => TxParams::UpdateServiceDestination(parse(json)?),
            Method::DisableServiceDestination => {
                TxParams::DisableServiceDestination(parse(json)?)
            }
            Method::EnableServiceDestination => TxParams::EnableServiceDestination(parse(json)?),

            Method::AddErrorCode => TxParams::AddErrorCode(parse(json)?),
            Method::RemoveErrorCode => TxParams::RemoveErrorCode(parse(json)?),

            Method::SetLastBlock => TxParams::SetLastBlock(parse(json)?),
        };
        Ok(params)
    }
}
