//! # Node Runtime Library
//!
//! Host-side wiring of the Identity-Ledger application: configuration,
//! logging, storage backends and an in-process block driver. The `main.rs`
//! binary uses these to run a node; the end-to-end tests use them to drive
//! the ledger exactly as the binary does.

pub mod adapters;
pub mod container;
pub mod logging;

pub use adapters::{BlockDriver, BlockResult};
pub use container::{ContainerError, LedgerContainer, NodeConfig, SharedApp};
