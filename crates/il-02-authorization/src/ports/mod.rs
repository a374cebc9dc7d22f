//! Ports of the authorization guard.

pub mod inbound;

pub use inbound::AuthorizationApi;
