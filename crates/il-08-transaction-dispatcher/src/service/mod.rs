//! # Identity Application
//!
//! Binds the state database, the authorization guard and the query engine
//! behind [`ApplicationCallbacks`].
//!
//! ## Apply Pipeline
//!
//! ```text
//! raw ─► admit ──► authorize ──► execute(handler) ──► merge writes
//!          │code 1     │code 2        │code 3
//!          ▼           ▼              ▼
//!       rejected    rejected    rejected, writes dropped
//! ```
//!
//! Each transaction runs in its own [`il_01_entity_store::TxState`]; its
//! writes reach the block only when the handler succeeds, so a rejection
//! can never leave partial state behind.

mod chain;
mod router;

pub use chain::set_last_block;
pub use router::execute;

use crate::domain::{BlockStats, DispatchError, DispatcherConfig};
use crate::ports::ApplicationCallbacks;
use il_01_entity_store::{keys, KeyValueStore, Overlay, StateDb, StoreError};
use il_02_authorization::{AuthorizationApi, AuthorizationGuard, KeyLookup};
use il_07_query_engine::{ChainInfo, QueryApi, QueryEngine};
use shared_crypto::Hash;
use shared_types::{Method, QueryOutcome, QueryRequest, TxContext, TxOutcome};
use tracing::{debug, error, info, warn};

/// A transaction that passed every check, waiting to be merged.
struct Applied {
    method: Method,
    hash: Hash,
    writes: Overlay,
    touched_nodes: bool,
}

/// The ledger application.
pub struct IdentityApp {
    db: StateDb,
    guard: AuthorizationGuard,
    queries: QueryEngine,
    stats: BlockStats,
}

impl IdentityApp {
    /// Open the ledger over `store`, resuming from its last commit.
    pub fn new(store: Box<dyn KeyValueStore>, config: DispatcherConfig) -> Result<Self, StoreError> {
        let db = StateDb::open(store)?;
        info!(
            last_height = db.last_height(),
            key_cache_size = config.key_cache_size,
            "Identity application ready"
        );
        Ok(Self {
            db,
            guard: AuthorizationGuard::new(config.key_cache_size),
            queries: QueryEngine::new(),
            stats: BlockStats::default(),
        })
    }

    /// Height of the last committed block.
    pub fn last_height(&self) -> u64 {
        self.db.last_height()
    }

    /// Root of the last commit.
    pub fn state_root(&self) -> Hash {
        self.db.state_root()
    }

    /// Keys written by applied transactions of the current block.
    pub fn pending_writes(&self) -> usize {
        self.db.pending_len()
    }

    /// Outcomes of the current block so far.
    pub fn block_stats(&self) -> BlockStats {
        self.stats
    }

    /// Node keys currently held by the apply-path cache.
    pub fn cached_keys(&self) -> usize {
        self.guard.cached_keys()
    }

    fn check(&self, raw: &[u8]) -> Result<(), DispatchError> {
        let tx = self.guard.admit(raw)?;
        let view = self.db.committed();
        self.guard
            .authorize(&view, &tx, self.db.current_height(), KeyLookup::Fresh)?;
        Ok(())
    }

    fn run(&self, raw: &[u8]) -> Result<Applied, DispatchError> {
        let height = self.db.current_height();
        let tx = self.guard.admit(raw)?;
        let mut state = self.db.begin_tx();
        let caller = self
            .guard
            .authorize(&state, &tx, height, KeyLookup::Cached)?;

        let ctx = TxContext::new(tx.method, caller.node_id, caller.role, height);
        execute(&mut state, &ctx, &tx.params)?;

        Ok(Applied {
            method: tx.method,
            hash: tx.hash,
            touched_nodes: state.wrote_prefix(keys::NODE_PREFIX.as_bytes()),
            writes: state.into_writes(),
        })
    }
}

/// Log and stop. Continuing after a store failure or a broken invariant
/// would commit state other replicas do not have.
fn halt(stage: &str, err: &dyn std::fmt::Display) -> ! {
    error!(stage, error = %err, "Fatal ledger error, halting");
    panic!("fatal ledger error during {stage}: {err}");
}

impl ApplicationCallbacks for IdentityApp {
    fn begin_block(&mut self, height: u64) {
        self.db.begin_block(height);
        self.stats = BlockStats::default();
        debug!(height, "Block started");
    }

    fn validate(&self, raw: &[u8]) -> TxOutcome {
        match self.check(raw) {
            Ok(()) => TxOutcome::success(),
            Err(e) if e.is_fatal() => halt("validate", &e),
            Err(e) => {
                debug!(code = e.code(), error = %e, "Transaction failed validation");
                e.to_outcome()
            }
        }
    }

    fn apply(&mut self, raw: &[u8]) -> TxOutcome {
        match self.run(raw) {
            Ok(applied) => {
                self.db.merge(applied.writes);
                if applied.touched_nodes {
                    self.guard.invalidate_keys();
                }
                self.stats.record(true);
                debug!(
                    method = %applied.method,
                    tx = %hex::encode(applied.hash),
                    height = self.db.current_height(),
                    "Transaction applied"
                );
                TxOutcome::success()
            }
            Err(e) if e.is_fatal() => halt("apply", &e),
            Err(e) => {
                self.stats.record(false);
                warn!(
                    code = e.code(),
                    error = %e,
                    height = self.db.current_height(),
                    "Transaction rejected"
                );
                e.to_outcome()
            }
        }
    }

    fn query(&self, request: &QueryRequest) -> QueryOutcome {
        let chain = ChainInfo {
            height: self.db.last_height(),
            state_root: self.db.state_root(),
        };
        self.queries.query(&self.db.committed(), &chain, request)
    }

    fn commit(&mut self) -> Hash {
        let stats = std::mem::take(&mut self.stats);
        match self.db.commit() {
            Ok(root) => {
                info!(
                    height = self.db.last_height(),
                    accepted = stats.accepted,
                    rejected = stats.rejected,
                    state_root = %hex::encode(root),
                    "Block committed"
                );
                root
            }
            Err(e) => halt("commit", &e),
        }
    }
}
