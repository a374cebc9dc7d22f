//! Domain layer of the authorization guard.

pub mod cache;
pub mod entities;
pub mod policy;

pub use cache::{NodeKeyCache, DEFAULT_KEY_CACHE_SIZE};
pub use entities::{AdmittedTx, Authorized, KeyLookup};
pub use policy::{is_permitted, permitted_roles};
