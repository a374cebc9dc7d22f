//! # il-08-transaction-dispatcher
//!
//! The application side of the replication engine's callback protocol.
//!
//! ## Role in System
//!
//! ```text
//! engine ──begin_block──► IdentityApp
//!        ──validate─────► admit → authorize (committed state, fresh keys)
//!        ──apply────────► admit → authorize (tx view, cached keys) → handler
//!        ──query────────► QueryEngine (committed state)
//!        ──commit───────► StateDb::commit → state root
//! ```
//!
//! Rejections are classified by code: 1 admission, 2 authorization,
//! 3 business rule. A rejected transaction leaves no writes behind. Store
//! failures and broken invariants are fatal: the dispatcher logs them and
//! halts rather than commit divergent state.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{BlockStats, DispatchError, DispatcherConfig};
pub use ports::ApplicationCallbacks;
pub use service::{execute, set_last_block, IdentityApp};
