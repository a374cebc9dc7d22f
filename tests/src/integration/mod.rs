//! # Integration Tests
//!
//! Every test here submits signed envelopes through the block driver and
//! observes the ledger only through outcomes and queries.

pub mod determinism;
pub mod gating;
pub mod registry;
pub mod scenarios;
