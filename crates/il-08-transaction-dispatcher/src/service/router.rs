//! # Method Router
//!
//! One arm per method. Each arm hands the decoded params to the owning
//! subsystem's handler; enable/disable pairs share a handler with a flag.

use super::chain::set_last_block;
use il_01_entity_store::StateWriter;
use il_03_node_registry as nodes;
use il_04_identity_ledger as identity;
use il_05_request_protocol as requests;
use il_06_service_registry as services;
use shared_types::{LedgerError, TxContext, TxParams};

/// Run the handler for `params` against `state`.
pub fn execute<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &TxParams,
) -> Result<(), LedgerError> {
    match params {
        // Nodes and proxies
        TxParams::InitNdid(p) => nodes::init_ndid(state, ctx, p),
        TxParams::RegisterNode(p) => nodes::register_node(state, ctx, p),
        TxParams::UpdateNode(p) => nodes::update_node(state, ctx, p),
        TxParams::UpdateNodeByNdid(p) => nodes::update_node_by_ndid(state, ctx, p),
        TxParams::SetMqAddresses(p) => nodes::set_mq_addresses(state, ctx, p),
        TxParams::DisableNode(p) => nodes::set_node_active(state, ctx, p, false),
        TxParams::EnableNode(p) => nodes::set_node_active(state, ctx, p, true),
        TxParams::AddNodeToken(p) => nodes::add_node_token(state, ctx, p),
        TxParams::ReduceNodeToken(p) => nodes::reduce_node_token(state, ctx, p),
        TxParams::SetNodeToken(p) => nodes::set_node_token(state, ctx, p),
        TxParams::AddNodeToProxyNode(p) => nodes::add_node_to_proxy(state, ctx, p),
        TxParams::UpdateNodeProxyNode(p) => nodes::update_node_proxy(state, ctx, p),
        TxParams::RemoveNodeFromProxyNode(p) => nodes::remove_node_from_proxy(state, ctx, p),

        // Namespaces and governance
        TxParams::AddNamespace(p) => identity::add_namespace(state, ctx, p),
        TxParams::UpdateNamespace(p) => identity::update_namespace(state, ctx, p),
        TxParams::DisableNamespace(p) => identity::set_namespace_active(state, ctx, p, false),
        TxParams::EnableNamespace(p) => identity::set_namespace_active(state, ctx, p, true),
        TxParams::SetAllowedModeList(p) => identity::set_allowed_mode_list(state, ctx, p),
        TxParams::SetAllowedMinIalForRegisterIdentityAtFirstIdp(p) => {
            identity::set_allowed_min_ial(state, ctx, p)
        }

        // Identities and accessors
        TxParams::RegisterIdentity(p) => identity::register_identity(state, ctx, p),
        TxParams::AddIdentity(p) => identity::add_identity(state, ctx, p),
        TxParams::UpdateIdentity(p) => identity::update_identity(state, ctx, p),
        TxParams::UpdateIdentityModeList(p) => identity::update_identity_mode_list(state, ctx, p),
        TxParams::AddAccessorMethod(p) => identity::add_accessor(state, ctx, p),
        TxParams::RevokeAccessor(p) => identity::revoke_accessor(state, ctx, p),
        TxParams::RevokeAndAddAccessor(p) => identity::revoke_and_add_accessor(state, ctx, p),
        TxParams::RevokeIdentityAssociation(p) => {
            identity::revoke_identity_association(state, ctx, p)
        }

        // Requests
        TxParams::CreateRequest(p) => requests::create_request(state, ctx, p),
        TxParams::CreateIdpResponse(p) => requests::create_idp_response(state, ctx, p),
        TxParams::CreateAsResponse(p) => requests::create_as_response(state, ctx, p),
        TxParams::SetDataReceived(p) => requests::set_data_received(state, ctx, p),
        TxParams::CloseRequest(p) => requests::close_request(state, ctx, p),
        TxParams::TimeOutRequest(p) => requests::time_out_request(state, ctx, p),

        // Services and error codes
        TxParams::AddService(p) => services::add_service(state, ctx, p),
        TxParams::UpdateService(p) => services::update_service(state, ctx, p),
        TxParams::DisableService(p) => services::set_service_active(state, ctx, p, false),
        TxParams::EnableService(p) => services::set_service_active(state, ctx, p, true),
        TxParams::RegisterServiceDestinationByNdid(p) => {
            services::approve_service_destination(state, ctx, p)
        }
        TxParams::DisableServiceDestinationByNdid(p) => {
            services::set_approval_active(state, ctx, p, false)
        }
        TxParams::EnableServiceDestinationByNdid(p) => {
            services::set_approval_active(state, ctx, p, true)
        }
        TxParams::RegisterServiceDestination(p) => {
            services::register_service_destination(state, ctx, p)
        }
        TxParams::UpdateServiceDestination(p) => {
            services::update_service_destination(state, ctx, p)
        }
        TxParams::DisableServiceDestination(p) => {
            services::set_destination_active(state, ctx, p, false)
        }
        TxParams::EnableServiceDestination(p) => {
            services::set_destination_active(state, ctx, p, true)
        }
        TxParams::AddErrorCode(p) => services::add_error_code(state, ctx, p),
        TxParams::RemoveErrorCode(p) => services::remove_error_code(state, ctx, p),

        // Chain
        TxParams::SetLastBlock(p) => set_last_block(state, ctx, p),
    }
}
