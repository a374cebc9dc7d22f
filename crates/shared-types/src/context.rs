//! # Transaction Context
//!
//! What a handler knows about the transaction it is applying besides its
//! parameters: who signed it, under which method, at which height.

use crate::entities::Role;
use crate::methods::Method;

/// Caller and position of the transaction being applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxContext {
    /// Method being applied.
    pub method: Method,
    /// Signer node id.
    pub caller_id: String,
    /// Signer role (NDID for `InitNDID`).
    pub caller_role: Role,
    /// Height of the block being built.
    pub height: u64,
}

impl TxContext {
    /// Build a context.
    pub fn new(method: Method, caller_id: impl Into<String>, caller_role: Role, height: u64) -> Self {
        Self {
            method,
            caller_id: caller_id.into(),
            caller_role,
            height,
        }
    }
}
