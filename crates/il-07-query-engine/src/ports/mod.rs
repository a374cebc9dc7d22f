//! Ports of the query engine.

pub mod inbound;

pub use inbound::QueryApi;
