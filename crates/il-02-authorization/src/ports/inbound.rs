//! # Inbound Ports (Driving Ports / API)
//!
//! The dispatcher drives the guard in two steps: `admit` without state, then
//! `authorize` against whichever view the caller is working on.

use crate::domain::{AdmittedTx, Authorized, KeyLookup};
use il_01_entity_store::StateReader;
use shared_types::{AdmissionError, AuthError};

/// Transaction admission and authorization.
pub trait AuthorizationApi: Send + Sync {
    /// Decode and shape-check raw envelope bytes.
    fn admit(&self, raw: &[u8]) -> Result<AdmittedTx, AdmissionError>;

    /// Resolve the signer, verify the signature and apply the role policy.
    fn authorize(
        &self,
        reader: &dyn StateReader,
        tx: &AdmittedTx,
        height: u64,
        lookup: KeyLookup,
    ) -> Result<Authorized, AuthError>;

    /// Forget cached keys after node records change.
    fn invalidate_keys(&self);
}
