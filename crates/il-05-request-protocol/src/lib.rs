//! # il-05-request-protocol
//!
//! Request/Response protocol for Identity-Ledger.
//!
//! ## Role in System
//!
//! - RPs (and IdPs) open verification requests naming target IdPs and
//!   optional AS data requests.
//! - IdPs answer once each; AS nodes answer once per data request.
//! - The requester closes the request with a per-IdP validity tally, or
//!   times it out. A request also times out implicitly once the ledger
//!   height passes `creation_block_height + request_timeout`.
//! - [`require_gating_request`] is the single consent check used by every
//!   gated identity mutation.

pub mod domain;
pub mod service;

pub use domain::require_gating_request;
pub use service::*;
