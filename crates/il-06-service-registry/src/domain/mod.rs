//! Domain rules of the service registry.

pub mod visibility;

pub use visibility::{is_visible, visible_destination, visible_destinations};
