//! # Inbound Ports (Driving Ports / API)
//!
//! The callback surface the replication engine drives. Wire encoding of the
//! protocol lives outside this crate.

use shared_crypto::Hash;
use shared_types::{QueryOutcome, QueryRequest, TxOutcome};

/// Block lifecycle callbacks, invoked by a single driver in block order.
pub trait ApplicationCallbacks: Send + Sync {
    /// Start building block `height`.
    fn begin_block(&mut self, height: u64);

    /// Admission and authorization against committed state. Never writes.
    fn validate(&self, raw: &[u8]) -> TxOutcome;

    /// Full check and execution within the block being built.
    fn apply(&mut self, raw: &[u8]) -> TxOutcome;

    /// Unauthenticated read of committed state.
    fn query(&self, request: &QueryRequest) -> QueryOutcome;

    /// Persist the block and return the new state root.
    fn commit(&mut self) -> Hash;
}
