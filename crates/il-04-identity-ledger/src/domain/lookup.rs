//! # Reference-Group Lookup
//!
//! Identity operations name their group either by code or by one of its
//! identities, never both.

use il_01_entity_store::{EntityReader, StateReader};
use shared_types::{LedgerError, ReferenceGroup};

/// Resolve the group addressed by `code` or by `(namespace, identifier_hash)`.
pub fn resolve_reference_group<R: StateReader + ?Sized>(
    reader: &R,
    code: &str,
    namespace: &str,
    identifier_hash: &str,
) -> Result<ReferenceGroup, LedgerError> {
    let has_identity = !namespace.is_empty() || !identifier_hash.is_empty();
    if !code.is_empty() && has_identity {
        return Err(LedgerError::FoundCodeAndIdentity);
    }

    let code = if !code.is_empty() {
        code.to_string()
    } else if has_identity {
        reader
            .reference_group_code_by_identity(namespace, identifier_hash)?
            .ok_or(LedgerError::ReferenceGroupNotFound)?
    } else {
        return Err(LedgerError::ReferenceGroupNotFound);
    };

    reader
        .reference_group(&code)?
        .ok_or(LedgerError::ReferenceGroupNotFound)
}

/// Group of an accessor, with the index and the group agreeing.
pub fn group_of_accessor<R: StateReader + ?Sized>(
    reader: &R,
    accessor_id: &str,
) -> Result<ReferenceGroup, LedgerError> {
    let code = reader
        .reference_group_code_by_accessor(accessor_id)?
        .ok_or(LedgerError::AccessorNotFound)?;
    let group = reader.reference_group(&code)?.ok_or_else(|| {
        LedgerError::Invariant(format!("accessor {accessor_id} indexed to missing group {code}"))
    })?;
    if group.accessor(accessor_id).is_none() {
        return Err(LedgerError::Invariant(format!(
            "accessor {accessor_id} missing from group {code}"
        )));
    }
    Ok(group)
}
