//! # Adapter Implementations
//!
//! - `storage`: implementations of the ledger's outbound `KeyValueStore` port.
//! - `driver`: an in-process driver of the inbound callback port, standing in
//!   for the replication engine.
//!
//! ```text
//! replication engine / BlockDriver
//!            │ ApplicationCallbacks
//!            ▼
//!       IdentityApp ──KeyValueStore──► InMemoryKVStore | RocksDbStore
//! ```

pub mod driver;
pub mod storage;

pub use driver::{BlockDriver, BlockResult};
