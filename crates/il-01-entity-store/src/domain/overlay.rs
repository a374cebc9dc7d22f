//! # Write Overlays and the State Root
//!
//! A block accumulates successful transactions' writes in a pending overlay;
//! each transaction writes into its own overlay first and is merged only on
//! success. `None` marks a delete.

use shared_crypto::Hash;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Staged writes, ordered by key.
pub type Overlay = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

const TAG_DELETE: u8 = 0;
const TAG_PUT: u8 = 1;

/// Apply `overlay` entries under `prefix` on top of `base`.
pub fn overlay_prefix(base: &mut BTreeMap<Vec<u8>, Vec<u8>>, overlay: &Overlay, prefix: &[u8]) {
    for (key, value) in overlay
        .range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
    {
        match value {
            Some(v) => {
                base.insert(key.clone(), v.clone());
            }
            None => {
                base.remove(key);
            }
        }
    }
}

/// Whether `overlay` touches any key under `prefix`.
pub fn touches_prefix(overlay: &Overlay, prefix: &[u8]) -> bool {
    overlay
        .range(prefix.to_vec()..)
        .next()
        .is_some_and(|(k, _)| k.starts_with(prefix))
}

/// `SHA-256(prev_root ‖ height ‖ entries)`.
///
/// Each entry is `len(key) ‖ key ‖ tag ‖ len(value) ‖ value` with big-endian
/// `u64` lengths, in key order. Deletes carry tag 0 and an empty value.
pub fn compute_state_root(prev_root: &Hash, height: u64, pending: &Overlay) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(prev_root);
    hasher.update(height.to_be_bytes());
    for (key, value) in pending {
        hasher.update((key.len() as u64).to_be_bytes());
        hasher.update(key);
        match value {
            Some(v) => {
                hasher.update([TAG_PUT]);
                hasher.update((v.len() as u64).to_be_bytes());
                hasher.update(v);
            }
            None => {
                hasher.update([TAG_DELETE]);
                hasher.update(0u64.to_be_bytes());
            }
        }
    }
    hasher.finalize().into()
}
