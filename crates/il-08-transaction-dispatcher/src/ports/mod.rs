//! Ports of the dispatcher.

pub mod inbound;

pub use inbound::ApplicationCallbacks;
