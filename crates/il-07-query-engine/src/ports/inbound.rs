//! # Inbound Ports
//!
//! The read API the dispatcher forwards `query` callbacks to.

use crate::domain::ChainInfo;
use il_01_entity_store::StateReader;
use shared_types::{QueryOutcome, QueryRequest};

/// Read-only projections over committed state.
pub trait QueryApi: Send + Sync {
    /// Answer `request` from `reader`. Never fails: errors become the log.
    fn query(&self, reader: &dyn StateReader, chain: &ChainInfo, request: &QueryRequest)
        -> QueryOutcome;
}
