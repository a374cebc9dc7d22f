//! # Storage Adapters
//!
//! Backends for the ledger's `KeyValueStore` port.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to use the persistent backend:
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! Without it only the in-memory store from `il-01-entity-store` is
//! available.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

pub use il_01_entity_store::InMemoryKVStore;
