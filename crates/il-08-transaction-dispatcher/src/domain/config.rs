//! Dispatcher configuration.

use il_02_authorization::DEFAULT_KEY_CACHE_SIZE;

/// Tunables of [`crate::IdentityApp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Entries in the apply-path node key cache.
    pub key_cache_size: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            key_cache_size: DEFAULT_KEY_CACHE_SIZE,
        }
    }
}

impl DispatcherConfig {
    /// Small cache for tests.
    pub fn for_testing() -> Self {
        Self { key_cache_size: 16 }
    }
}
