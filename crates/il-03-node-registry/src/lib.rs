//! # il-03-node-registry
//!
//! Node & Proxy Registry for Identity-Ledger.
//!
//! ## Role in System
//!
//! - Registers network participants and their signing/master keys.
//! - Maintains token balances and MQ transport endpoints.
//! - Places RP, IdP and AS nodes behind Proxy nodes, with an explicit cycle
//!   walk on every link change.
//! - Resolves the *effective* key and transport of a node, used by the
//!   authorization guard and the query engine.
//!
//! The proxy link is a non-owning lookup key (`proxy_node_id`); nothing here
//! holds references between node records.

pub mod domain;
pub mod service;

pub use domain::{
    check_proxy_target, effective_key, effective_mq_addresses, proxy_of, validate_node_key,
    KeyKind, ResolveError,
};
pub use service::*;
