//! # il-01-entity-store
//!
//! Entity Store Adapter for Identity-Ledger.
//!
//! ## Role in System
//!
//! - **Leaf component**: no business logic, only typed access to an ordered
//!   byte-key store.
//! - **Isolation**: handlers write into a per-transaction overlay; the
//!   dispatcher merges it into the block only when the handler succeeds.
//! - **Determinism**: the state root is a hash chain over each block's sorted
//!   writes, identical on every replica for the same transaction sequence.
//!
//! ## Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | `ports` | `KeyValueStore`, `StateReader`, `StateWriter` |
//! | `adapters` | `InMemoryKVStore` |
//! | `repository` | `EntityReader`, `EntityWriter` |
//! | `service` | `StateDb`, `CommittedView`, `TxState` |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod repository;
pub mod service;

pub use adapters::InMemoryKVStore;
pub use domain::{compute_state_root, keys, Overlay, StoreError};
pub use ports::{
    BatchOperation, KeyValueStore, StateReader, StateReaderExt, StateWriter, StateWriterExt,
};
pub use repository::{EntityReader, EntityWriter};
pub use service::{CommittedView, StateDb, TxState};
