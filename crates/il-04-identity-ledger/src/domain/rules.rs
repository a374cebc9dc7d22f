//! # Identity Rules
//!
//! Checks shared by the registration and mutation handlers.

use il_01_entity_store::{EntityReader, StateReader};
use shared_crypto::PublicKey;
use shared_types::levels::{is_valid_ial, is_valid_mode_list, level_le};
use shared_types::{IdentityRef, LedgerError, Node, ReferenceGroup};
use std::collections::{BTreeSet, HashSet};

/// Non-empty identity list with one entry per namespace, each namespace
/// registered and active.
pub fn check_new_identities<R: StateReader + ?Sized>(
    reader: &R,
    identities: &[IdentityRef],
) -> Result<(), LedgerError> {
    if identities.is_empty() {
        return Err(LedgerError::IdentityListRequired);
    }
    let mut namespaces = HashSet::new();
    for identity in identities {
        if !namespaces.insert(identity.namespace.as_str()) {
            return Err(LedgerError::DuplicateNamespaceInIdentityList);
        }
    }
    for identity in identities {
        let namespace = reader
            .namespace(&identity.namespace)?
            .ok_or(LedgerError::NamespaceNotFound)?;
        if !namespace.active {
            return Err(LedgerError::NamespaceNotActive);
        }
    }
    Ok(())
}

/// No pair in `identities` is bound to any group yet.
pub fn check_unbound<R: StateReader + ?Sized>(
    reader: &R,
    identities: &[IdentityRef],
) -> Result<(), LedgerError> {
    for identity in identities {
        if reader
            .reference_group_code_by_identity(&identity.namespace, &identity.identifier_hash)?
            .is_some()
        {
            return Err(LedgerError::IdentityAlreadyExisted);
        }
    }
    Ok(())
}

/// `ial` is a valid level within the IdP's ceiling.
pub fn check_ial(ial: f64, idp: &Node) -> Result<(), LedgerError> {
    if !is_valid_ial(ial) {
        return Err(LedgerError::InvalidIal);
    }
    if !level_le(ial, idp.max_ial) {
        return Err(LedgerError::IalExceedsMax);
    }
    Ok(())
}

/// Non-empty, valid, duplicate-free mode list.
pub fn check_mode_list(modes: &[u8]) -> Result<(), LedgerError> {
    if modes.is_empty() {
        return Err(LedgerError::ModeListRequired);
    }
    if !is_valid_mode_list(modes) {
        return Err(LedgerError::InvalidMode);
    }
    Ok(())
}

/// Unused accessor id with a parseable key.
pub fn check_new_accessor<R: StateReader + ?Sized>(
    reader: &R,
    accessor_id: &str,
    accessor_public_key: &str,
) -> Result<(), LedgerError> {
    if accessor_id.is_empty() {
        return Err(LedgerError::AccessorIdRequired);
    }
    if reader
        .reference_group_code_by_accessor(accessor_id)?
        .is_some()
    {
        return Err(LedgerError::DuplicateAccessorId);
    }
    PublicKey::from_pem(accessor_public_key).map_err(|_| LedgerError::InvalidAccessorKey)?;
    Ok(())
}

/// Per-namespace identifier ceilings of `group` as it will be stored.
///
/// Only `namespaces` are checked, so tightening a ceiling never blocks
/// operations on namespaces the transaction does not touch.
pub fn check_ceilings<'a, R: StateReader + ?Sized>(
    reader: &R,
    group: &ReferenceGroup,
    namespaces: impl IntoIterator<Item = &'a str>,
) -> Result<(), LedgerError> {
    let active = group.has_active_idp();
    let namespaces: BTreeSet<&str> = namespaces.into_iter().collect();
    for name in namespaces {
        let Some(namespace) = reader.namespace(name)? else {
            continue;
        };
        let count = group.identity_count(name) as u64;
        if let Some(max) = namespace.allowed_identifier_count_in_reference_group {
            if count > u64::from(max) {
                return Err(LedgerError::IdentifierCountExceeded);
            }
        }
        if active {
            if let Some(max) = namespace.allowed_active_identifier_count_in_reference_group {
                if count > u64::from(max) {
                    return Err(LedgerError::ActiveIdentifierCountExceeded);
                }
            }
        }
    }
    Ok(())
}
