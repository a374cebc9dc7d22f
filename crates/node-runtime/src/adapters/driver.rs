//! # Block Driver
//!
//! Drives the ledger the way a replication engine would: one block at a
//! time, `begin_block → apply* → commit`, with `validate` and `query`
//! served between blocks. Used for local runs and end-to-end tests.

use crate::container::SharedApp;
use il_08_transaction_dispatcher::ApplicationCallbacks;
use shared_crypto::Hash;
use shared_types::{QueryOutcome, QueryRequest, TxOutcome};
use tracing::debug;

/// Result of one delivered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResult {
    pub height: u64,
    /// One outcome per transaction, in delivery order.
    pub outcomes: Vec<TxOutcome>,
    pub state_root: Hash,
}

impl BlockResult {
    /// Whether every transaction in the block was accepted.
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(TxOutcome::is_ok)
    }
}

/// Sequential block feeder over a shared application.
pub struct BlockDriver {
    app: SharedApp,
    next_height: u64,
}

impl BlockDriver {
    /// Continue after the application's last committed block.
    pub fn new(app: SharedApp) -> Self {
        let next_height = app.read().last_height() + 1;
        Self { app, next_height }
    }

    /// Height the next block will get.
    pub fn next_height(&self) -> u64 {
        self.next_height
    }

    /// Mempool-style admission check against committed state.
    pub fn check_tx(&self, raw: &[u8]) -> TxOutcome {
        self.app.read().validate(raw)
    }

    /// Apply `txs` as the next block and commit it.
    pub fn deliver_block(&mut self, txs: &[Vec<u8>]) -> BlockResult {
        let height = self.next_height;
        let mut app = self.app.write();
        app.begin_block(height);
        let outcomes: Vec<TxOutcome> = txs.iter().map(|raw| app.apply(raw)).collect();
        let state_root = app.commit();
        drop(app);

        self.next_height = height + 1;
        debug!(height, txs = txs.len(), "Block delivered");
        BlockResult {
            height,
            outcomes,
            state_root,
        }
    }

    /// Unauthenticated read of committed state.
    pub fn query(&self, request: &QueryRequest) -> QueryOutcome {
        self.app.read().query(request)
    }
}
