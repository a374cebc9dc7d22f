//! Adapters for the entity store ports.

pub mod memory;

pub use memory::InMemoryKVStore;
