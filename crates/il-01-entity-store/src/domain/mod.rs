//! Domain layer of the entity store.

pub mod errors;
pub mod keys;
pub mod overlay;

pub use errors::StoreError;
pub use overlay::{compute_state_root, Overlay};
