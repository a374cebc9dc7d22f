//! # Destination Visibility
//!
//! A destination is offered to requesters only while all four hold:
//! the service is active, the AS enabled the destination, NDID has not
//! suspended the approval, and the AS node is active.

use il_01_entity_store::{EntityReader, StateReader, StoreError};
use shared_types::ServiceDestination;

/// Whether `destination` is currently offered.
pub fn is_visible<R: StateReader + ?Sized>(
    reader: &R,
    destination: &ServiceDestination,
) -> Result<bool, StoreError> {
    if !destination.active || destination.suspended {
        return Ok(false);
    }
    let service_active = reader
        .service(&destination.service_id)?
        .is_some_and(|s| s.active);
    if !service_active {
        return Ok(false);
    }
    Ok(reader
        .node(&destination.node_id)?
        .is_some_and(|n| n.active))
}

/// Visible destinations of `service_id`, in AS id order.
pub fn visible_destinations<R: StateReader + ?Sized>(
    reader: &R,
    service_id: &str,
) -> Result<Vec<ServiceDestination>, StoreError> {
    let mut visible = Vec::new();
    for destination in reader.service_destinations(service_id)? {
        if is_visible(reader, &destination)? {
            visible.push(destination);
        }
    }
    Ok(visible)
}

/// The destination of `(service_id, as_id)` if it is visible.
pub fn visible_destination<R: StateReader + ?Sized>(
    reader: &R,
    service_id: &str,
    as_id: &str,
) -> Result<Option<ServiceDestination>, StoreError> {
    match reader.service_destination(service_id, as_id)? {
        Some(destination) if is_visible(reader, &destination)? => Ok(Some(destination)),
        _ => Ok(None),
    }
}
