//! Namespace registry and mode governance.

use il_01_entity_store::{EntityReader, EntityWriter, StateWriter};
use shared_types::levels::{is_valid_ial, is_valid_mode_list};
use shared_types::{
    AddNamespaceParams, LedgerError, Namespace, NamespaceParams, SetAllowedMinIalParams,
    SetAllowedModeListParams, TxContext, UpdateNamespaceParams,
};

/// Negative means unlimited.
fn ceiling(raw: i64) -> Option<u32> {
    if raw < 0 {
        None
    } else {
        Some(u32::try_from(raw).unwrap_or(u32::MAX))
    }
}

/// `AddNamespace`.
pub fn add_namespace<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &AddNamespaceParams,
) -> Result<(), LedgerError> {
    if params.namespace.is_empty() {
        return Err(LedgerError::NamespaceRequired);
    }
    if state.namespace(&params.namespace)?.is_some() {
        return Err(LedgerError::DuplicateNamespace);
    }
    state.put_namespace(&Namespace {
        namespace: params.namespace.clone(),
        description: params.description.clone(),
        active: true,
        allowed_identifier_count_in_reference_group: params
            .allowed_identifier_count_in_reference_group
            .and_then(ceiling),
        allowed_active_identifier_count_in_reference_group: params
            .allowed_active_identifier_count_in_reference_group
            .and_then(ceiling),
    })?;
    Ok(())
}

/// `UpdateNamespace`: description and ceilings; a negative ceiling clears it.
pub fn update_namespace<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &UpdateNamespaceParams,
) -> Result<(), LedgerError> {
    let mut namespace = state
        .namespace(&params.namespace)?
        .ok_or(LedgerError::NamespaceNotFound)?;
    if let Some(description) = &params.description {
        namespace.description = description.clone();
    }
    if let Some(raw) = params.allowed_identifier_count_in_reference_group {
        namespace.allowed_identifier_count_in_reference_group = ceiling(raw);
    }
    if let Some(raw) = params.allowed_active_identifier_count_in_reference_group {
        namespace.allowed_active_identifier_count_in_reference_group = ceiling(raw);
    }
    state.put_namespace(&namespace)?;
    Ok(())
}

/// `DisableNamespace` / `EnableNamespace`.
pub fn set_namespace_active<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &NamespaceParams,
    active: bool,
) -> Result<(), LedgerError> {
    let mut namespace = state
        .namespace(&params.namespace)?
        .ok_or(LedgerError::NamespaceNotFound)?;
    namespace.active = active;
    state.put_namespace(&namespace)?;
    Ok(())
}

/// `SetAllowedModeList`.
pub fn set_allowed_mode_list<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &SetAllowedModeListParams,
) -> Result<(), LedgerError> {
    if params.allowed_mode_list.is_empty() {
        return Err(LedgerError::ModeListRequired);
    }
    if !is_valid_mode_list(&params.allowed_mode_list) {
        return Err(LedgerError::InvalidMode);
    }
    state.set_allowed_mode_list(&params.purpose, &params.allowed_mode_list)?;
    Ok(())
}

/// `SetAllowedMinIalForRegisterIdentityAtFirstIdp`.
pub fn set_allowed_min_ial<S: StateWriter + ?Sized>(
    state: &mut S,
    _ctx: &TxContext,
    params: &SetAllowedMinIalParams,
) -> Result<(), LedgerError> {
    if !is_valid_ial(params.min_ial) {
        return Err(LedgerError::InvalidIal);
    }
    state.set_allowed_min_ial_for_first_idp(params.min_ial)?;
    Ok(())
}
