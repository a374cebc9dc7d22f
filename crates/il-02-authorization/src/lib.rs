//! # il-02-authorization
//!
//! Authorization Guard for Identity-Ledger.
//!
//! ## Role in System
//!
//! - **Admission**: decodes the envelope and the method's closed parameter
//!   type without touching state.
//! - **Authorization**: resolves the signer's effective key (own, or the
//!   proxy's under `KEY_ON_PROXY`), verifies `method ‖ params ‖ nonce`, and
//!   applies the role policy.
//! - **Key cache**: an LRU of resolved keys used on the apply path only.
//!
//! `UpdateNode` is verified with the master key; `InitNDID` with the key it
//! carries.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    is_permitted, permitted_roles, AdmittedTx, Authorized, KeyLookup, NodeKeyCache,
    DEFAULT_KEY_CACHE_SIZE,
};
pub use ports::AuthorizationApi;
pub use service::AuthorizationGuard;
