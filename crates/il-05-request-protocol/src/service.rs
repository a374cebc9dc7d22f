//! # Request Protocol Handlers
//!
//! ## Lifecycle
//!
//! ```text
//! CreateRequest ──► open ──CreateIdpResponse / CreateAsResponse──► open
//!                    │
//!                    ├──CloseRequest──────────────► closed
//!                    └──TimeOutRequest / deadline──► timed out
//! ```
//!
//! Closed and timed-out requests accept no responses. Requests are never
//! deleted.

use crate::domain::{build_data_requests, check_idp_list, checked_minimum};
use il_01_entity_store::{EntityReader, EntityWriter, StateWriter};
use il_06_service_registry::visible_destination;
use shared_types::levels::{is_valid_aal, is_valid_ial, is_valid_mode, level_le};
use shared_types::{
    AsResponse, CreateAsResponseParams, CreateIdpResponseParams, CreateRequestParams,
    ErrorCodeType, FinishRequestParams, IdpResponse, LedgerError, Request, ResponseStatus,
    SetDataReceivedParams, TxContext,
};
use tracing::debug;

fn require_request<S: StateWriter + ?Sized>(
    state: &S,
    request_id: &str,
) -> Result<Request, LedgerError> {
    state
        .request(request_id)?
        .ok_or(LedgerError::RequestNotFound)
}

/// Request must still accept responses at `height`.
fn ensure_open(request: &Request, height: u64) -> Result<(), LedgerError> {
    if request.closed {
        return Err(LedgerError::RequestClosed);
    }
    if request.is_timed_out_at(height) {
        return Err(LedgerError::RequestTimedOut);
    }
    Ok(())
}

fn ensure_requester(request: &Request, ctx: &TxContext) -> Result<(), LedgerError> {
    if request.requester_node_id != ctx.caller_id {
        return Err(LedgerError::OnlyRequester);
    }
    Ok(())
}

fn ensure_registered_code<S: StateWriter + ?Sized>(
    state: &S,
    error_type: ErrorCodeType,
    code: i32,
) -> Result<(), LedgerError> {
    if state.error_code(error_type, code)?.is_none() {
        return Err(LedgerError::InvalidErrorCode);
    }
    Ok(())
}

// =============================================================================
// CREATION
// =============================================================================

/// `CreateRequest`.
pub fn create_request<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &CreateRequestParams,
) -> Result<(), LedgerError> {
    if params.request_id.is_empty() {
        return Err(LedgerError::RequestIdRequired);
    }
    if state.request_exists(&params.request_id)? {
        return Err(LedgerError::DuplicateRequestId);
    }
    if !is_valid_mode(params.mode) {
        return Err(LedgerError::InvalidMode);
    }
    if !state
        .allowed_mode_list(&params.purpose)?
        .contains(&params.mode)
    {
        return Err(LedgerError::ModeNotAllowed);
    }
    if !is_valid_ial(params.min_ial) {
        return Err(LedgerError::InvalidIal);
    }
    if !is_valid_aal(params.min_aal) {
        return Err(LedgerError::InvalidAal);
    }

    let min_idp = checked_minimum(
        params.min_idp,
        params.idp_id_list.len(),
        LedgerError::NegativeMinIdp,
        LedgerError::MinIdpExceedsList,
    )?;
    check_idp_list(state, &params.idp_id_list)?;
    let data_request_list = build_data_requests(state, &params.data_request_list)?;

    state.put_request(&Request {
        request_id: params.request_id.clone(),
        requester_node_id: ctx.caller_id.clone(),
        min_idp,
        min_ial: params.min_ial,
        min_aal: params.min_aal,
        mode: params.mode,
        purpose: params.purpose.clone(),
        request_timeout: params.request_timeout,
        idp_id_list: params.idp_id_list.clone(),
        data_request_list,
        request_message_hash: params.request_message_hash.clone(),
        response_list: Vec::new(),
        closed: false,
        timed_out: false,
        creation_block_height: ctx.height,
    })?;

    debug!(request_id = %params.request_id, requester = %ctx.caller_id, "Request created");
    Ok(())
}

// =============================================================================
// RESPONSES
// =============================================================================

/// `CreateIdpResponse`.
pub fn create_idp_response<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &CreateIdpResponseParams,
) -> Result<(), LedgerError> {
    let mut request = require_request(state, &params.request_id)?;
    ensure_open(&request, ctx.height)?;

    if !request.idp_id_list.is_empty() && !request.idp_id_list.contains(&ctx.caller_id) {
        return Err(LedgerError::IdpNotInList);
    }
    if request.response_from(&ctx.caller_id).is_some() {
        return Err(LedgerError::DuplicateResponse);
    }
    let status: ResponseStatus = params
        .status
        .parse()
        .map_err(|_| LedgerError::InvalidResponseStatus)?;
    if let Some(code) = params.error_code {
        if status != ResponseStatus::Reject {
            return Err(LedgerError::InvalidErrorCode);
        }
        ensure_registered_code(state, ErrorCodeType::Idp, code)?;
    }

    let idp = state
        .node(&ctx.caller_id)?
        .ok_or(LedgerError::NodeNotFound)?;
    if !idp.supported_request_mode_list.contains(&request.mode) {
        return Err(LedgerError::ModeNotSupported);
    }
    if !level_le(request.min_ial, idp.max_ial) {
        return Err(LedgerError::MaxIalBelowRequest);
    }
    if !level_le(request.min_aal, idp.max_aal) {
        return Err(LedgerError::MaxAalBelowRequest);
    }
    if status == ResponseStatus::Accept {
        if !is_valid_ial(params.ial) {
            return Err(LedgerError::InvalidIal);
        }
        if !is_valid_aal(params.aal) {
            return Err(LedgerError::InvalidAal);
        }
        if !level_le(params.ial, idp.max_ial) {
            return Err(LedgerError::IalExceedsMax);
        }
        if !level_le(params.aal, idp.max_aal) {
            return Err(LedgerError::AalExceedsMax);
        }
    }

    request.response_list.push(IdpResponse {
        idp_id: ctx.caller_id.clone(),
        ial: params.ial,
        aal: params.aal,
        status,
        signature: params.signature.clone(),
        error_code: params.error_code,
        valid_ial: None,
        valid_signature: None,
    });
    state.put_request(&request)?;
    Ok(())
}

/// `CreateAsResponse`.
pub fn create_as_response<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &CreateAsResponseParams,
) -> Result<(), LedgerError> {
    let mut request = require_request(state, &params.request_id)?;
    ensure_open(&request, ctx.height)?;

    let Some(index) = request
        .data_request_list
        .iter()
        .position(|d| d.service_id == params.service_id)
    else {
        return Err(LedgerError::ServiceNotInRequest);
    };
    let data_request = &request.data_request_list[index];
    if !data_request.as_id_list.is_empty() && !data_request.as_id_list.contains(&ctx.caller_id)
    {
        return Err(LedgerError::AsNotInList);
    }
    if state
        .service_destination(&params.service_id, &ctx.caller_id)?
        .is_none()
    {
        return Err(LedgerError::DestinationNotFound);
    }
    if visible_destination(state, &params.service_id, &ctx.caller_id)?.is_none() {
        return Err(LedgerError::DestinationNotActive);
    }
    if data_request
        .response_list
        .iter()
        .any(|r| r.as_id == ctx.caller_id)
    {
        return Err(LedgerError::DuplicateAsResponse);
    }
    if let Some(code) = params.error_code {
        ensure_registered_code(state, ErrorCodeType::As, code)?;
    }

    request.data_request_list[index]
        .response_list
        .push(AsResponse {
            as_id: ctx.caller_id.clone(),
            signature: params.signature.clone(),
            error_code: params.error_code,
            received_data: false,
        });
    state.put_request(&request)?;
    Ok(())
}

/// `SetDataReceived`: the requester acknowledges an AS response.
pub fn set_data_received<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &SetDataReceivedParams,
) -> Result<(), LedgerError> {
    let mut request = require_request(state, &params.request_id)?;
    ensure_requester(&request, ctx)?;

    let data_request = request
        .data_request_list
        .iter_mut()
        .find(|d| d.service_id == params.service_id)
        .ok_or(LedgerError::ServiceNotInRequest)?;
    let response = data_request
        .response_list
        .iter_mut()
        .find(|r| r.as_id == params.as_id)
        .ok_or(LedgerError::AsResponseNotFound)?;
    response.received_data = true;

    state.put_request(&request)?;
    Ok(())
}

// =============================================================================
// TERMINATION
// =============================================================================

/// Record the requester's per-IdP validity verdicts.
fn record_validity(request: &mut Request, params: &FinishRequestParams) -> Result<(), LedgerError> {
    for verdict in &params.response_valid_list {
        let response = request
            .response_list
            .iter_mut()
            .find(|r| r.idp_id == verdict.idp_id)
            .ok_or(LedgerError::ResponseValidNotResponder)?;
        response.valid_ial = verdict.valid_ial;
        response.valid_signature = verdict.valid_signature;
    }
    Ok(())
}

/// `CloseRequest`.
pub fn close_request<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &FinishRequestParams,
) -> Result<(), LedgerError> {
    let mut request = require_request(state, &params.request_id)?;
    ensure_requester(&request, ctx)?;
    ensure_open(&request, ctx.height)?;
    record_validity(&mut request, params)?;
    request.closed = true;
    state.put_request(&request)?;
    debug!(request_id = %params.request_id, responses = request.response_list.len(), "Request closed");
    Ok(())
}

/// `TimeOutRequest`.
pub fn time_out_request<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &FinishRequestParams,
) -> Result<(), LedgerError> {
    let mut request = require_request(state, &params.request_id)?;
    ensure_requester(&request, ctx)?;
    if request.closed {
        return Err(LedgerError::CannotTimeOutClosed);
    }
    if request.timed_out {
        return Err(LedgerError::RequestTimedOut);
    }
    record_validity(&mut request, params)?;
    request.timed_out = true;
    state.put_request(&request)?;
    Ok(())
}
