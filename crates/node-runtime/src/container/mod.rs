//! # Ledger Container
//!
//! Opens the configured store and holds the ledger application behind a
//! lock: the single block driver takes the write side, queries and
//! `validate` share the read side.

pub mod config;

pub use config::{ConfigError, LoggingConfig, NodeConfig, StorageConfig, StoreBackend};

use il_01_entity_store::{InMemoryKVStore, KeyValueStore, StoreError};
use il_08_transaction_dispatcher::IdentityApp;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// The application as shared between the driver and readers.
pub type SharedApp = Arc<RwLock<IdentityApp>>;

/// Failures while assembling the node.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to open ledger store: {0}")]
    Store(#[from] StoreError),
}

/// Configuration plus the opened application.
pub struct LedgerContainer {
    pub config: NodeConfig,
    app: SharedApp,
}

impl LedgerContainer {
    /// Open the configured backend and the application over it.
    pub fn open(config: NodeConfig) -> Result<Self, ContainerError> {
        let store = open_store(&config.storage)?;
        let app = IdentityApp::new(store, config.dispatcher.clone())?;
        info!(
            backend = ?config.storage.backend,
            last_height = app.last_height(),
            state_root = %hex::encode(app.state_root()),
            "Ledger opened"
        );
        Ok(Self {
            config,
            app: Arc::new(RwLock::new(app)),
        })
    }

    /// Shared handle to the application.
    pub fn app(&self) -> SharedApp {
        Arc::clone(&self.app)
    }
}

fn open_store(storage: &StorageConfig) -> Result<Box<dyn KeyValueStore>, ContainerError> {
    match storage.backend {
        StoreBackend::Memory => Ok(Box::new(InMemoryKVStore::new())),
        StoreBackend::RocksDb => open_rocksdb(storage),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(storage: &StorageConfig) -> Result<Box<dyn KeyValueStore>, ContainerError> {
    use crate::adapters::storage::{RocksDbConfig, RocksDbStore};

    let path = storage.ledger_path();
    std::fs::create_dir_all(&storage.data_dir).map_err(|e| StoreError::IOError {
        message: format!("Failed to create {}: {e}", storage.data_dir.display()),
    })?;
    Ok(Box::new(RocksDbStore::open(RocksDbConfig::at(path))?))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_storage: &StorageConfig) -> Result<Box<dyn KeyValueStore>, ContainerError> {
    Err(ConfigError::BackendUnavailable.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BlockDriver;
    use shared_types::QueryRequest;

    #[test]
    fn test_memory_backend_starts_empty() {
        let container = LedgerContainer::open(NodeConfig::default()).unwrap();
        let app = container.app();
        assert_eq!(app.read().last_height(), 0);
        assert_eq!(app.read().state_root(), [0u8; 32]);
    }

    #[test]
    fn test_driver_commits_empty_blocks() {
        let container = LedgerContainer::open(NodeConfig::default()).unwrap();
        let mut driver = BlockDriver::new(container.app());

        let first = driver.deliver_block(&[]);
        let second = driver.deliver_block(&[]);
        assert_eq!((first.height, second.height), (1, 2));
        assert_ne!(first.state_root, second.state_root);
        assert_eq!(driver.next_height(), 3);

        let outcome = driver.query(&QueryRequest {
            method: "GetChainInfo".into(),
            params: String::new(),
        });
        let info: serde_json::Value = serde_json::from_str(&outcome.value).unwrap();
        assert_eq!(info["height"], 2);
    }

    #[cfg(not(feature = "rocksdb"))]
    #[test]
    fn test_rocksdb_backend_needs_feature() {
        let mut config = NodeConfig::default();
        config.storage.backend = StoreBackend::RocksDb;
        assert!(matches!(
            LedgerContainer::open(config),
            Err(ContainerError::Config(ConfigError::BackendUnavailable))
        ));
    }
}
