//! # Service Registry Handlers

use il_01_entity_store::{EntityReader, EntityWriter, StateWriter};
use shared_types::levels::{is_valid_aal, is_valid_ial};
use shared_types::{
    AddErrorCodeParams, AddServiceParams, ErrorCode, ErrorCodeType, LedgerError,
    RegisterServiceDestinationParams, RemoveErrorCodeParams, Role, Service, ServiceApproval,
    ServiceApprovalParams, ServiceDestination, ServiceIdParams, TxContext, UpdateServiceParams,
    UpdateServiceDestinationParams,
};
use tracing::info;

// =============================================================================
// SERVICES
// =============================================================================

/// `AddService`.
pub fn add_service<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &AddServiceParams,
) -> Result<(), LedgerError> {
    if params.service_id.is_empty() {
        return Err(LedgerError::ServiceIdRequired);
    }
    if state.service(&params.service_id)?.is_some() {
        return Err(LedgerError::DuplicateServiceId);
    }
    state.put_service(&Service {
        service_id: params.service_id.clone(),
        service_name: params.service_name.clone(),
        data_schema: params.data_schema.clone(),
        data_schema_version: params.data_schema_version.clone(),
        active: true,
    })?;
    Ok(())
}

/// `UpdateService`.
pub fn update_service<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &UpdateServiceParams,
) -> Result<(), LedgerError> {
    let mut service = state
        .service(&params.service_id)?
        .ok_or(LedgerError::ServiceNotFound)?;
    if let Some(name) = &params.service_name {
        service.service_name = name.clone();
    }
    if let Some(schema) = &params.data_schema {
        service.data_schema = schema.clone();
    }
    if let Some(version) = &params.data_schema_version {
        service.data_schema_version = version.clone();
    }
    state.put_service(&service)?;
    Ok(())
}

/// `DisableService` / `EnableService`.
pub fn set_service_active<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &ServiceIdParams,
    active: bool,
) -> Result<(), LedgerError> {
    let mut service = state
        .service(&params.service_id)?
        .ok_or(LedgerError::ServiceNotFound)?;
    service.active = active;
    state.put_service(&service)?;
    Ok(())
}

// =============================================================================
// NDID APPROVALS
// =============================================================================

/// `RegisterServiceDestinationByNDID`: allow an AS to serve a service.
pub fn approve_service_destination<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &ServiceApprovalParams,
) -> Result<(), LedgerError> {
    if state.service(&params.service_id)?.is_none() {
        return Err(LedgerError::ServiceNotFound);
    }
    let node = state
        .node(&params.node_id)?
        .ok_or(LedgerError::NodeNotFound)?;
    if node.role != Role::As {
        return Err(LedgerError::NodeNotAs);
    }
    if state
        .service_approval(&params.service_id, &params.node_id)?
        .is_some()
    {
        return Err(LedgerError::DuplicateApproval);
    }
    state.put_service_approval(&ServiceApproval {
        service_id: params.service_id.clone(),
        node_id: params.node_id.clone(),
        active: true,
    })?;
    info!(
        service_id = %params.service_id,
        node_id = %params.node_id,
        height = ctx.height,
        "Service destination approved"
    );
    Ok(())
}

/// `DisableServiceDestinationByNDID` / `EnableServiceDestinationByNDID`.
///
/// Mirrors the approval state into the destination's `suspended` flag.
pub fn set_approval_active<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &ServiceApprovalParams,
    active: bool,
) -> Result<(), LedgerError> {
    let mut approval = state
        .service_approval(&params.service_id, &params.node_id)?
        .ok_or(LedgerError::DestinationNotApproved)?;
    approval.active = active;
    state.put_service_approval(&approval)?;

    if let Some(mut destination) =
        state.service_destination(&params.service_id, &params.node_id)?
    {
        destination.suspended = !active;
        state.put_service_destination(&destination)?;
    }
    Ok(())
}

// =============================================================================
// AS DESTINATIONS
// =============================================================================

fn check_levels(min_ial: f64, min_aal: f64) -> Result<(), LedgerError> {
    if !is_valid_ial(min_ial) {
        return Err(LedgerError::InvalidIal);
    }
    if !is_valid_aal(min_aal) {
        return Err(LedgerError::InvalidAal);
    }
    Ok(())
}

fn check_namespaces<S: StateWriter + ?Sized>(
    state: &S,
    namespaces: &[String],
) -> Result<(), LedgerError> {
    for namespace in namespaces {
        if state.namespace(namespace)?.is_none() {
            return Err(LedgerError::NamespaceNotFound);
        }
    }
    Ok(())
}

fn require_destination<S: StateWriter + ?Sized>(
    state: &S,
    service_id: &str,
    node_id: &str,
) -> Result<ServiceDestination, LedgerError> {
    state
        .service_destination(service_id, node_id)?
        .ok_or(LedgerError::DestinationNotFound)
}

/// `RegisterServiceDestination`: the calling AS offers an approved service.
pub fn register_service_destination<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &RegisterServiceDestinationParams,
) -> Result<(), LedgerError> {
    if state.service(&params.service_id)?.is_none() {
        return Err(LedgerError::ServiceNotFound);
    }
    let approved = state
        .service_approval(&params.service_id, &ctx.caller_id)?
        .is_some_and(|a| a.active);
    if !approved {
        return Err(LedgerError::DestinationNotApproved);
    }
    if state
        .service_destination(&params.service_id, &ctx.caller_id)?
        .is_some()
    {
        return Err(LedgerError::DuplicateDestination);
    }
    check_levels(params.min_ial, params.min_aal)?;
    check_namespaces(state, &params.supported_namespace_list)?;

    state.put_service_destination(&ServiceDestination {
        service_id: params.service_id.clone(),
        node_id: ctx.caller_id.clone(),
        min_ial: params.min_ial,
        min_aal: params.min_aal,
        supported_namespace_list: params.supported_namespace_list.clone(),
        active: true,
        suspended: false,
    })?;
    Ok(())
}

/// `UpdateServiceDestination`.
pub fn update_service_destination<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &UpdateServiceDestinationParams,
) -> Result<(), LedgerError> {
    let mut destination = require_destination(state, &params.service_id, &ctx.caller_id)?;
    let min_ial = params.min_ial.unwrap_or(destination.min_ial);
    let min_aal = params.min_aal.unwrap_or(destination.min_aal);
    check_levels(min_ial, min_aal)?;
    destination.min_ial = min_ial;
    destination.min_aal = min_aal;
    if let Some(namespaces) = &params.supported_namespace_list {
        check_namespaces(state, namespaces)?;
        destination.supported_namespace_list = namespaces.clone();
    }
    state.put_service_destination(&destination)?;
    Ok(())
}

/// `DisableServiceDestination` / `EnableServiceDestination`.
pub fn set_destination_active<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &ServiceIdParams,
    active: bool,
) -> Result<(), LedgerError> {
    let mut destination = require_destination(state, &params.service_id, &ctx.caller_id)?;
    destination.active = active;
    state.put_service_destination(&destination)?;
    Ok(())
}

// =============================================================================
// ERROR CODES
// =============================================================================

fn error_type(raw: &str) -> Result<ErrorCodeType, LedgerError> {
    raw.parse().map_err(|_| LedgerError::InvalidErrorCodeType)
}

/// `AddErrorCode`.
pub fn add_error_code<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &AddErrorCodeParams,
) -> Result<(), LedgerError> {
    let error_type = error_type(&params.error_type)?;
    if state.error_code(error_type, params.error_code)?.is_some() {
        return Err(LedgerError::DuplicateErrorCode);
    }
    state.put_error_code(&ErrorCode {
        error_code: params.error_code,
        error_type,
        description: params.description.clone(),
        fatal: params.fatal,
    })?;
    Ok(())
}

/// `RemoveErrorCode`.
pub fn remove_error_code<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &RemoveErrorCodeParams,
) -> Result<(), LedgerError> {
    let error_type = error_type(&params.error_type)?;
    if state.error_code(error_type, params.error_code)?.is_none() {
        return Err(LedgerError::ErrorCodeNotExists);
    }
    state.delete_error_code(error_type, params.error_code);
    Ok(())
}
