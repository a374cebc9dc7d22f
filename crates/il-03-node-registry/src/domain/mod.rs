//! Domain rules of the node registry.

pub mod keys;
pub mod proxy;
pub mod resolve;

pub use keys::validate_node_key;
pub use proxy::{check_proxy_target, ensure_no_cycle};
pub use resolve::{effective_key, effective_mq_addresses, proxy_of, KeyKind, ResolveError};
