//! # Shared Types Crate
//!
//! This crate contains all ledger entities, the closed method set, per-method
//! parameter types, the signed transaction envelope and the rejection
//! taxonomy.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Closed Dispatch**: Methods and their parameters form a tagged union;
//!   an unknown method is an admission error, never a runtime type error.
//! - **Stable Messages**: Error `Display` strings are the transaction logs.

pub mod context;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod levels;
pub mod methods;
pub mod params;

pub use context::TxContext;
pub use entities::*;
pub use envelope::*;
pub use errors::*;
pub use methods::{Method, MethodCategory};
pub use params::*;
