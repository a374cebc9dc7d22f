//! Namespace, reference-group, accessor and governance projections.

use super::{answer, answer_list, found, QueryError};
use crate::domain::{
    AccessorKeyView, AccessorOwnerView, AccessorQuery, AllowedModeListView, ExistView,
    IdentityInfoQuery, IdentityInfoView, IdentityQuery, MinIalView, NamespaceView, PurposeQuery,
    ReferenceGroupCodeView,
};
use il_01_entity_store::{EntityReader, StateReader};
use il_04_identity_ledger::{group_of_accessor, resolve_reference_group};
use shared_types::{LedgerError, QueryOutcome, ReferenceGroup};

/// Resolve a group; "not found" is an empty answer, not an error.
fn lookup<R: StateReader + ?Sized>(
    reader: &R,
    code: &str,
    namespace: &str,
    identifier_hash: &str,
) -> Result<Option<ReferenceGroup>, QueryError> {
    match resolve_reference_group(reader, code, namespace, identifier_hash) {
        Ok(group) => Ok(Some(group)),
        Err(LedgerError::ReferenceGroupNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn accessor_group<R: StateReader + ?Sized>(
    reader: &R,
    accessor_id: &str,
) -> Result<Option<ReferenceGroup>, QueryError> {
    match group_of_accessor(reader, accessor_id) {
        Ok(group) => Ok(Some(group)),
        Err(LedgerError::AccessorNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Active namespaces only.
pub(super) fn namespace_list<R: StateReader + ?Sized>(
    reader: &R,
) -> Result<QueryOutcome, QueryError> {
    let namespaces: Vec<NamespaceView> = reader
        .namespaces()?
        .into_iter()
        .filter(|n| n.active)
        .map(NamespaceView::from)
        .collect();
    answer_list(namespaces)
}

/// What `node_id` asserted about the subject, if its association is active.
pub(super) fn identity_info<R: StateReader + ?Sized>(
    reader: &R,
    query: &IdentityInfoQuery,
) -> Result<QueryOutcome, QueryError> {
    let group = lookup(
        reader,
        &query.reference_group_code,
        &query.identity_namespace,
        &query.identity_identifier_hash,
    )?;
    let info = group.as_ref().and_then(|g| g.active_idp(&query.node_id)).map(|a| {
        IdentityInfoView {
            ial: a.ial,
            mode_list: a.mode_list.clone(),
        }
    });
    answer(info)
}

pub(super) fn reference_group_code<R: StateReader + ?Sized>(
    reader: &R,
    query: &IdentityQuery,
) -> Result<QueryOutcome, QueryError> {
    let code = reader
        .reference_group_code_by_identity(&query.identity_namespace, &query.identity_identifier_hash)?
        .map(|reference_group_code| ReferenceGroupCodeView { reference_group_code });
    answer(code)
}

pub(super) fn reference_group_code_by_accessor<R: StateReader + ?Sized>(
    reader: &R,
    query: &AccessorQuery,
) -> Result<QueryOutcome, QueryError> {
    let code = reader
        .reference_group_code_by_accessor(&query.accessor_id)?
        .map(|reference_group_code| ReferenceGroupCodeView { reference_group_code });
    answer(code)
}

/// A subject exists while at least one IdP still serves it.
pub(super) fn check_existing_identity<R: StateReader + ?Sized>(
    reader: &R,
    query: &IdentityQuery,
) -> Result<QueryOutcome, QueryError> {
    let group = lookup(
        reader,
        &query.reference_group_code,
        &query.identity_namespace,
        &query.identity_identifier_hash,
    )?;
    let exist = group.is_some_and(|g| g.has_active_idp());
    answer(exist.then_some(ExistView { exist }))
}

pub(super) fn accessor_key<R: StateReader + ?Sized>(
    reader: &R,
    query: &AccessorQuery,
) -> Result<QueryOutcome, QueryError> {
    let view = accessor_group(reader, &query.accessor_id)?.and_then(|group| {
        group.accessor(&query.accessor_id).map(|a| AccessorKeyView {
            accessor_public_key: a.accessor_public_key.clone(),
            active: a.active,
        })
    });
    answer(view)
}

pub(super) fn accessor_owner<R: StateReader + ?Sized>(
    reader: &R,
    query: &AccessorQuery,
) -> Result<QueryOutcome, QueryError> {
    let view = accessor_group(reader, &query.accessor_id)?.and_then(|group| {
        group.accessor(&query.accessor_id).map(|a| AccessorOwnerView {
            node_id: a.owner_idp.clone(),
        })
    });
    answer(view)
}

/// Unset purposes answer the default list.
pub(super) fn allowed_mode_list<R: StateReader + ?Sized>(
    reader: &R,
    query: &PurposeQuery,
) -> Result<QueryOutcome, QueryError> {
    found(&AllowedModeListView {
        allowed_mode_list: reader.allowed_mode_list(&query.purpose)?,
    })
}

pub(super) fn allowed_min_ial<R: StateReader + ?Sized>(
    reader: &R,
) -> Result<QueryOutcome, QueryError> {
    found(&MinIalView {
        min_ial: reader.allowed_min_ial_for_first_idp()?,
    })
}
