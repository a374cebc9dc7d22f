//! # il-07-query-engine
//!
//! Read-only projections for Identity-Ledger.
//!
//! Queries are unauthenticated and read committed state only. Each one is
//! a `{method, params}` pair answered with a JSON value and a log:
//! `"success"`, `"not found"` (value is the empty shape), or an error
//! message such as `"Unknown query method: X"`.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{ChainInfo, QueryError};
pub use ports::QueryApi;
pub use service::QueryEngine;
