//! # Node Key Cache
//!
//! LRU of resolved effective keys, keyed by `(node_id, KeyKind)`.
//!
//! Entries are only valid for the node records they were resolved from.
//! The dispatcher clears the whole cache whenever an applied transaction
//! writes any node record, so a key change or proxy change is visible to
//! the very next transaction.

use il_03_node_registry::KeyKind;
use lru::LruCache;
use parking_lot::Mutex;
use shared_types::NodeKey;
use std::num::NonZeroUsize;

/// Default number of cached keys.
pub const DEFAULT_KEY_CACHE_SIZE: usize = 1024;

/// Thread-safe LRU of effective node keys.
pub struct NodeKeyCache {
    inner: Mutex<LruCache<(String, KeyKind), NodeKey>>,
}

impl NodeKeyCache {
    /// Cache holding at most `capacity` keys (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, node_id: &str, kind: KeyKind) -> Option<NodeKey> {
        self.inner.lock().get(&(node_id.to_string(), kind)).cloned()
    }

    pub fn put(&self, node_id: &str, kind: KeyKind, key: NodeKey) {
        self.inner.lock().put((node_id.to_string(), kind), key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NodeKeyCache {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_CACHE_SIZE)
    }
}
