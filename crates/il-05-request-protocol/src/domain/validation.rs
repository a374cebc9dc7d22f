//! Target-list checks for `CreateRequest`.

use il_01_entity_store::{EntityReader, StateReader};
use il_06_service_registry::visible_destination;
use shared_types::{DataRequest, DataRequestParams, LedgerError, Role};
use std::collections::HashSet;

/// Convert a signed minimum to a count no larger than the target list.
///
/// An empty list means "any", so only the sign is checked then.
pub fn checked_minimum(
    minimum: i64,
    list_len: usize,
    negative: LedgerError,
    exceeds: LedgerError,
) -> Result<u32, LedgerError> {
    if minimum < 0 {
        return Err(negative);
    }
    if list_len > 0 && minimum as u64 > list_len as u64 {
        return Err(exceeds);
    }
    Ok(u32::try_from(minimum).unwrap_or(u32::MAX))
}

/// Every listed IdP is unique, registered, an IdP, and active.
pub fn check_idp_list<R: StateReader + ?Sized>(
    reader: &R,
    idp_id_list: &[String],
) -> Result<(), LedgerError> {
    let mut seen = HashSet::new();
    for idp_id in idp_id_list {
        if !seen.insert(idp_id.as_str()) {
            return Err(LedgerError::DuplicateIdpInList);
        }
        let node = reader
            .node(idp_id)?
            .ok_or(LedgerError::IdpInListNotFound)?;
        if node.role != Role::Idp {
            return Err(LedgerError::IdpInListNotIdp);
        }
        if !node.active {
            return Err(LedgerError::IdpInListNotActive);
        }
    }
    Ok(())
}

/// Validate data requests and build their stored form.
pub fn build_data_requests<R: StateReader + ?Sized>(
    reader: &R,
    params: &[DataRequestParams],
) -> Result<Vec<DataRequest>, LedgerError> {
    let mut services = HashSet::new();
    let mut built = Vec::with_capacity(params.len());

    for data_request in params {
        if !services.insert(data_request.service_id.as_str()) {
            return Err(LedgerError::DuplicateServiceInDataRequest);
        }
        let service = reader
            .service(&data_request.service_id)?
            .ok_or(LedgerError::ServiceNotFound)?;
        if !service.active {
            return Err(LedgerError::ServiceNotActive);
        }

        let mut as_ids = HashSet::new();
        for as_id in &data_request.as_id_list {
            if !as_ids.insert(as_id.as_str()) {
                return Err(LedgerError::DuplicateAsInDataRequest);
            }
            let node = reader.node(as_id)?.ok_or(LedgerError::AsInListNotFound)?;
            if node.role != Role::As {
                return Err(LedgerError::AsInListNotAs);
            }
            if !node.active {
                return Err(LedgerError::AsInListNotActive);
            }
            if visible_destination(reader, &data_request.service_id, as_id)?.is_none() {
                return Err(LedgerError::AsNotProvidingService);
            }
        }

        let min_as = checked_minimum(
            data_request.min_as,
            data_request.as_id_list.len(),
            LedgerError::NegativeMinAs,
            LedgerError::MinAsExceedsList,
        )?;

        built.push(DataRequest {
            service_id: data_request.service_id.clone(),
            as_id_list: data_request.as_id_list.clone(),
            min_as,
            request_params_hash: data_request.request_params_hash.clone(),
            response_list: Vec::new(),
        });
    }
    Ok(built)
}
