//! Reference-group registration and identity mutations.

use crate::domain::{
    check_ceilings, check_ial, check_mode_list, check_new_accessor, check_new_identities,
    check_unbound, resolve_reference_group,
};
use il_01_entity_store::{EntityReader, EntityWriter, StateWriter};
use il_05_request_protocol::require_gating_request;
use shared_types::levels::level_le;
use shared_types::{
    Accessor, AddIdentityParams, IdentityRef, IdpAssociation, LedgerError, Method, Node,
    ReferenceGroup, RegisterIdentityParams, RevokeIdentityAssociationParams, TxContext,
    UpdateIdentityModeListParams, UpdateIdentityParams,
};
use tracing::debug;

fn require_caller<S: StateWriter + ?Sized>(
    state: &S,
    ctx: &TxContext,
) -> Result<Node, LedgerError> {
    state
        .node(&ctx.caller_id)?
        .ok_or(LedgerError::NodeNotFound)
}

pub(crate) fn ensure_associated(group: &ReferenceGroup, idp_id: &str) -> Result<(), LedgerError> {
    match group.active_idp(idp_id) {
        Some(_) => Ok(()),
        None => Err(LedgerError::IdpNotAssociated),
    }
}

/// Point the identity index at `group` for each of `identities`.
fn index_identities<S: StateWriter + ?Sized>(
    state: &mut S,
    code: &str,
    identities: &[IdentityRef],
) -> Result<(), LedgerError> {
    for identity in identities {
        state.index_identity(&identity.namespace, &identity.identifier_hash, code)?;
    }
    Ok(())
}

/// `RegisterIdentity`: create a group, or join an existing one as a new IdP.
pub fn register_identity<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &RegisterIdentityParams,
) -> Result<(), LedgerError> {
    let code = params.reference_group_code.as_str();
    if code.is_empty() {
        return Err(LedgerError::ReferenceGroupCodeRequired);
    }
    check_new_identities(state, &params.new_identity_list)?;
    let idp = require_caller(state, ctx)?;
    check_ial(params.ial, &idp)?;
    check_mode_list(&params.mode_list)?;
    check_unbound(state, &params.new_identity_list)?;

    let existing = state.reference_group(code)?;
    let is_new = existing.is_none();
    let mut group = existing.unwrap_or_else(|| ReferenceGroup::new(code));
    if group.active_idp(&ctx.caller_id).is_some() {
        return Err(LedgerError::IdpAlreadyAssociated);
    }
    if is_new && !level_le(state.allowed_min_ial_for_first_idp()?, params.ial) {
        return Err(LedgerError::IalBelowFirstIdpMinimum);
    }

    let was_active = group.has_active_idp();
    let before = group.identities.len();
    group.identities.extend(params.new_identity_list.iter().cloned());
    match group.idp_mut(&ctx.caller_id) {
        Some(association) => {
            association.ial = params.ial;
            association.mode_list = params.mode_list.clone();
            association.active = true;
        }
        None => group.idps.push(IdpAssociation {
            node_id: ctx.caller_id.clone(),
            ial: params.ial,
            mode_list: params.mode_list.clone(),
            active: true,
        }),
    }

    // A group regaining an active IdP turns every identity in it active.
    let touched: Vec<String> = if was_active {
        group.identities[before..]
            .iter()
            .map(|i| i.namespace.clone())
            .collect()
    } else {
        group.identities.iter().map(|i| i.namespace.clone()).collect()
    };
    check_ceilings(state, &group, touched.iter().map(String::as_str))?;

    check_new_accessor(state, &params.accessor_id, &params.accessor_public_key)?;
    group.accessors.push(Accessor {
        accessor_id: params.accessor_id.clone(),
        accessor_public_key: params.accessor_public_key.clone(),
        accessor_type: params.accessor_type.clone(),
        owner_idp: ctx.caller_id.clone(),
        active: true,
        creation_block_height: ctx.height,
    });
    index_identities(state, code, &params.new_identity_list)?;
    state.index_accessor(&params.accessor_id, code)?;
    state.put_reference_group(&group)?;

    debug!(
        reference_group_code = code,
        idp = %ctx.caller_id,
        created = is_new,
        "Identity registered"
    );
    Ok(())
}

/// `AddIdentity` (gated): bind more identities to a group the caller serves.
pub fn add_identity<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &AddIdentityParams,
) -> Result<(), LedgerError> {
    if params.reference_group_code.is_empty() {
        return Err(LedgerError::ReferenceGroupCodeRequired);
    }
    let mut group = state
        .reference_group(&params.reference_group_code)?
        .ok_or(LedgerError::ReferenceGroupNotFound)?;
    ensure_associated(&group, &ctx.caller_id)?;
    check_new_identities(state, &params.new_identity_list)?;
    check_unbound(state, &params.new_identity_list)?;
    require_gating_request(state, &params.request_id, Method::AddIdentity, &ctx.caller_id)?;

    group.identities.extend(params.new_identity_list.iter().cloned());
    check_ceilings(
        state,
        &group,
        params.new_identity_list.iter().map(|i| i.namespace.as_str()),
    )?;
    index_identities(state, &params.reference_group_code, &params.new_identity_list)?;
    state.put_reference_group(&group)?;
    Ok(())
}

/// `UpdateIdentity`: change the caller's asserted IAL.
pub fn update_identity<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &UpdateIdentityParams,
) -> Result<(), LedgerError> {
    let mut group = resolve_reference_group(
        state,
        &params.reference_group_code,
        &params.identifier_namespace,
        &params.identifier_hash,
    )?;
    ensure_associated(&group, &ctx.caller_id)?;
    let idp = require_caller(state, ctx)?;
    check_ial(params.ial, &idp)?;

    if let Some(association) = group.idp_mut(&ctx.caller_id) {
        association.ial = params.ial;
    }
    state.put_reference_group(&group)?;
    Ok(())
}

/// `UpdateIdentityModeList`: change the caller's supported modes.
pub fn update_identity_mode_list<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &UpdateIdentityModeListParams,
) -> Result<(), LedgerError> {
    let mut group = resolve_reference_group(
        state,
        &params.reference_group_code,
        &params.identifier_namespace,
        &params.identifier_hash,
    )?;
    ensure_associated(&group, &ctx.caller_id)?;
    check_mode_list(&params.mode_list)?;

    if let Some(association) = group.idp_mut(&ctx.caller_id) {
        association.mode_list = params.mode_list.clone();
    }
    state.put_reference_group(&group)?;
    Ok(())
}

/// `RevokeIdentityAssociation` (gated): deactivate the caller's association
/// and every accessor it owns in the group.
pub fn revoke_identity_association<S: StateWriter + ?Sized>(
    state: &mut S,
    ctx: &TxContext,
    params: &RevokeIdentityAssociationParams,
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
        Method::RevokeIdentityAssociation,
        &ctx.caller_id,
    )?;

    if let Some(association) = group.idp_mut(&ctx.caller_id) {
        association.active = false;
    }
    for accessor in group
        .accessors
        .iter_mut()
        .filter(|a| a.owner_idp == ctx.caller_id)
    {
        accessor.active = false;
    }
    state.put_reference_group(&group)?;

    debug!(
        reference_group_code = %group.reference_group_code,
        idp = %ctx.caller_id,
        "Identity association revoked"
    );
    Ok(())
}
