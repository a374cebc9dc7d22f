//! Ports for the entity store.

pub mod outbound;
pub mod state;

pub use outbound::{prefix_end, BatchOperation, KeyValueStore};
pub use state::{StateReader, StateReaderExt, StateWriter, StateWriterExt};
