//! # Request Gate
//!
//! Identity mutations that need the subject's consent (adding identities,
//! adding or revoking accessors, revoking an association) must cite a
//! request that:
//!
//! 1. exists,
//! 2. is closed,
//! 3. has `purpose` equal to the mutation's method name,
//! 4. holds an `accept` response from the IdP performing the mutation.
//!
//! The request is read, never consumed: it keeps authorizing the same
//! method for that IdP on every group the IdP serves.

use il_01_entity_store::{EntityReader, StateReader};
use shared_types::{LedgerError, Method, Request, ResponseStatus};

/// Check the request cited by a gated `method` called by `actor`.
pub fn require_gating_request<R: StateReader + ?Sized>(
    reader: &R,
    request_id: &str,
    method: Method,
    actor: &str,
) -> Result<Request, LedgerError> {
    if request_id.is_empty() {
        return Err(LedgerError::RequestIdRequired);
    }
    let request = reader
        .request(request_id)?
        .ok_or(LedgerError::RequestNotFound)?;
    if !request.closed {
        return Err(LedgerError::RequestNotClosed);
    }
    if request.purpose != method.as_str() {
        return Err(LedgerError::PurposeMismatch);
    }
    let accepted = request
        .response_from(actor)
        .is_some_and(|r| r.status == ResponseStatus::Accept);
    if !accepted {
        return Err(LedgerError::IdpNotAccepted);
    }
    Ok(request)
}
