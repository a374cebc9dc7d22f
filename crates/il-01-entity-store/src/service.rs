//! # State Database
//!
//! Owns the store handle and the block's pending overlay.
//!
//! ```text
//! KeyValueStore (committed) ◄── CommittedView      (queries, validate)
//!        ▲
//!        │ commit(): atomic batch of pending + meta
//!        │
//!   pending Overlay ◄── merge ◄── TxState writes   (apply, on success only)
//! ```

use crate::domain::errors::StoreError;
use crate::domain::keys;
use crate::domain::overlay::{compute_state_root, overlay_prefix, touches_prefix, Overlay};
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use crate::ports::state::{StateReader, StateWriter};
use shared_crypto::Hash;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Store plus block-scoped pending writes.
pub struct StateDb {
    store: Box<dyn KeyValueStore>,
    pending: Overlay,
    last_height: u64,
    current_height: u64,
    state_root: Hash,
}

impl StateDb {
    /// Wrap `store`, resuming from the height and root recorded by the last commit.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let last_height = match store.get(keys::META_HEIGHT)? {
            Some(bytes) => {
                let raw: [u8; 8] =
                    bytes
                        .as_slice()
                        .try_into()
                        .map_err(|_| StoreError::Corrupted {
                            key: "meta:height".into(),
                            reason: format!("expected 8 bytes, got {}", bytes.len()),
                        })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };
        let state_root = match store.get(keys::META_STATE_ROOT)? {
            Some(bytes) => bytes
                .as_slice()
                .try_into()
                .map_err(|_| StoreError::Corrupted {
                    key: "meta:state_root".into(),
                    reason: format!("expected 32 bytes, got {}", bytes.len()),
                })?,
            None => [0u8; 32],
        };

        info!(
            last_height,
            state_root = %hex::encode(state_root),
            "Entity store opened"
        );

        Ok(Self {
            store,
            pending: Overlay::new(),
            last_height,
            current_height: last_height + 1,
            state_root,
        })
    }

    /// Start building block `height`.
    pub fn begin_block(&mut self, height: u64) {
        self.current_height = height;
    }

    /// Height of the block being built.
    pub fn current_height(&self) -> u64 {
        self.current_height
    }

    /// Height of the last committed block (0 before the first commit).
    pub fn last_height(&self) -> u64 {
        self.last_height
    }

    /// Root of the last commit.
    pub fn state_root(&self) -> Hash {
        self.state_root
    }

    /// Number of keys waiting for commit.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Read-only view of committed state.
    pub fn committed(&self) -> CommittedView<'_> {
        CommittedView {
            store: self.store.as_ref(),
        }
    }

    /// Fresh transaction scope over committed + pending state.
    pub fn begin_tx(&self) -> TxState<'_> {
        TxState {
            store: self.store.as_ref(),
            pending: &self.pending,
            writes: Overlay::new(),
        }
    }

    /// Fold a successful transaction's writes into the block.
    pub fn merge(&mut self, writes: Overlay) {
        self.pending.extend(writes);
    }

    /// Hash and persist the pending block, returning the new state root.
    pub fn commit(&mut self) -> Result<Hash, StoreError> {
        let height = self.current_height;
        let root = compute_state_root(&self.state_root, height, &self.pending);

        let pending = std::mem::take(&mut self.pending);
        let written = pending.len();
        let mut ops: Vec<BatchOperation> = pending
            .into_iter()
            .map(|(key, value)| match value {
                Some(v) => BatchOperation::Put { key, value: v },
                None => BatchOperation::Delete { key },
            })
            .collect();
        ops.push(BatchOperation::put(
            keys::META_HEIGHT.to_vec(),
            height.to_be_bytes().to_vec(),
        ));
        ops.push(BatchOperation::put(
            keys::META_STATE_ROOT.to_vec(),
            root.to_vec(),
        ));
        self.store.atomic_batch_write(ops)?;

        self.last_height = height;
        self.current_height = height + 1;
        self.state_root = root;

        debug!(height, written, state_root = %hex::encode(root), "Block committed");
        Ok(root)
    }
}

// =============================================================================
// VIEWS
// =============================================================================

/// Committed state only.
pub struct CommittedView<'a> {
    store: &'a dyn KeyValueStore,
}

impl StateReader for CommittedView<'_> {
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.store.get(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        self.store.prefix_scan(prefix)
    }
}

/// One transaction's scope: reads see committed, then pending, then own writes.
pub struct TxState<'a> {
    store: &'a dyn KeyValueStore,
    pending: &'a Overlay,
    writes: Overlay,
}

impl TxState<'_> {
    /// Staged writes, to be merged if the transaction succeeds.
    pub fn into_writes(self) -> Overlay {
        self.writes
    }

    /// Whether this transaction staged anything under `prefix`.
    pub fn wrote_prefix(&self, prefix: &[u8]) -> bool {
        touches_prefix(&self.writes, prefix)
    }

    /// Number of staged keys.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }
}

impl StateReader for TxState<'_> {
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(value) = self.writes.get(key) {
            return Ok(value.clone());
        }
        if let Some(value) = self.pending.get(key) {
            return Ok(value.clone());
        }
        self.store.get(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.store.prefix_scan(prefix)?.into_iter().collect();
        overlay_prefix(&mut merged, self.pending, prefix);
        overlay_prefix(&mut merged, &self.writes, prefix);
        Ok(merged.into_iter().collect())
    }
}

impl StateWriter for TxState<'_> {
    fn put_raw(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.writes.insert(key, Some(value));
    }

    fn delete_raw(&mut self, key: Vec<u8>) {
        self.writes.insert(key, None);
    }
}
