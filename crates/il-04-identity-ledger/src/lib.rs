//! # il-04-identity-ledger
//!
//! Namespace Registry and Identity/Reference-Group Ledger for
//! Identity-Ledger.
//!
//! ## Model
//!
//! A reference group is one real-world subject. It holds the subject's
//! identities (`namespace` + identifier hash), one association per IdP
//! that verified the subject, and the accessors (keys) the subject uses at
//! each IdP. Indexes map every identity and accessor back to its group.
//!
//! ## Consent
//!
//! After registration, any change that extends or revokes what an IdP can
//! do for a subject cites a closed request the IdP accepted, checked by
//! `il_05_request_protocol::require_gating_request`.

pub mod domain;
pub mod service;

pub use domain::{group_of_accessor, resolve_reference_group};
pub use service::*;
