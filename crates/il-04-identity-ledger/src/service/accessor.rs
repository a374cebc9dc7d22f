//! Accessor lifecycle.

use super::identity::ensure_associated;
use crate::domain::{check_new_accessor, group_of_accessor, resolve_reference_group};
use il_01_entity_store::{EntityReader, EntityWriter, StateWriter};
use il_05_request_protocol::require_gating_request;
use shared_types::{
    Accessor, AddAccessorParams, LedgerError, Method, ReferenceGroup, RevokeAccessorParams,
    RevokeAndAddAccessorParams, TxContext,
};

/// Accessor is owned by `idp_id` and still active.
fn check_revocable(group: &ReferenceGroup, accessor_id: &str, idp_id: &str) -> Result<(), LedgerError> {
    let accessor = group
        .accessor(accessor_id)
        .ok_or(LedgerError::AccessorNotFound)?;
    if accessor.owner_idp != idp_id {
        return Err(LedgerError::NotAccessorOwner);
    }
    if !accessor.active {
        return Err(LedgerError::AccessorNotActive);
    }
    Ok(())
}

fn new_accessor(ctx: &TxContext, id: &str, public_key: &str, accessor_type: &str) -> Accessor {
    Accessor {
        accessor_id: id.to_string(),
        accessor_public_key: public_key.to_string(),
        accessor_type: accessor_type.to_string(),
        owner_idp: ctx.caller_id.clone(),
        active: true,
        creation_block_height: ctx.height,
    }
}

/// `AddAccessorMethod` (gated).
pub fn add_accessor<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &AddAccessorParams,
) -> Result<(), LedgerError> {
    let mut group = resolve_reference_group(
        state,
        &params.reference_group_code,
        &params.identifier_namespace,
        &params.identifier_hash,
    )?;
    ensure_associated(&group, &ctx.caller_id)?;
    require_gating_request(
        state,
        &params.request_id,
        Method::AddAccessorMethod,
        &ctx.caller_id,
    )?;
    check_new_accessor(state, &params.accessor_id, &params.accessor_public_key)?;

    group.accessors.push(new_accessor(
        ctx,
        &params.accessor_id,
        &params.accessor_public_key,
        &params.accessor_type,
    ));
    state.index_accessor(&params.accessor_id, &group.reference_group_code)?;
    state.put_reference_group(&group)?;
    Ok(())
}

/// `RevokeAccessor` (gated): every listed accessor must belong to one group
/// and be owned by the caller.
pub fn revoke_accessor<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &RevokeAccessorParams,
) -> Result<(), LedgerError> {
    let Some(first) = params.accessor_id_list.first() else {
        return Err(LedgerError::AccessorIdRequired);
    };
    let mut group = group_of_accessor(state, first)?;
    for accessor_id in &params.accessor_id_list {
        let code = state
            .reference_group_code_by_accessor(accessor_id)?
            .ok_or(LedgerError::AccessorNotFound)?;
        if code != group.reference_group_code {
            return Err(LedgerError::AccessorGroupMismatch);
        }
        check_revocable(&group, accessor_id, &ctx.caller_id)?;
    }
    ensure_associated(&group, &ctx.caller_id)?;
    require_gating_request(state, &params.request_id, Method::RevokeAccessor, &ctx.caller_id)?;

    for accessor_id in &params.accessor_id_list {
        if let Some(accessor) = group.accessor_mut(accessor_id) {
            accessor.active = false;
        }
    }
    state.put_reference_group(&group)?;
    Ok(())
}

/// `RevokeAndAddAccessor` (gated): replace one accessor with a new one in
/// the same group.
pub fn revoke_and_add_accessor<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &RevokeAndAddAccessorParams,
) -> Result<(), LedgerError> {
    let mut group = group_of_accessor(state, &params.revoking_accessor_id)?;
    check_revocable(&group, &params.revoking_accessor_id, &ctx.caller_id)?;
    ensure_associated(&group, &ctx.caller_id)?;
    require_gating_request(
        state,
        &params.request_id,
        Method::RevokeAndAddAccessor,
        &ctx.caller_id,
    )?;
    check_new_accessor(state, &params.accessor_id, &params.accessor_public_key)?;

    if let Some(accessor) = group.accessor_mut(&params.revoking_accessor_id) {
        accessor.active = false;
    }
    group.accessors.push(new_accessor(
        ctx,
        &params.accessor_id,
        &params.accessor_public_key,
        &params.accessor_type,
    ));
    state.index_accessor(&params.accessor_id, &group.reference_group_code)?;
    state.put_reference_group(&group)?;
    Ok(())
}
