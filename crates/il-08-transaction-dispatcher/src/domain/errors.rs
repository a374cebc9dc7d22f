//! # Rejection Classes
//!
//! Every failure of `validate` or `apply` falls into exactly one class, and
//! the class decides the outcome code.

use shared_types::{
    AdmissionError, AuthError, LedgerError, TxOutcome, CODE_ADMISSION, CODE_AUTHORIZATION,
    CODE_BUSINESS,
};
use thiserror::Error;

/// A failed transaction, by the stage that rejected it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Authorization(#[from] AuthError),

    #[error(transparent)]
    Business(#[from] LedgerError),
}

impl DispatchError {
    /// Outcome code of this rejection.
    pub fn code(&self) -> u32 {
        match self {
            DispatchError::Admission(_) => CODE_ADMISSION,
            DispatchError::Authorization(_) => CODE_AUTHORIZATION,
            DispatchError::Business(_) => CODE_BUSINESS,
        }
    }

    /// Store failures and broken invariants halt the node.
    pub fn is_fatal(&self) -> bool {
        match self {
            DispatchError::Admission(_) => false,
            DispatchError::Authorization(e) => matches!(e, AuthError::Store(_)),
            DispatchError::Business(e) => e.is_fatal(),
        }
    }

    /// Outcome reported to the engine.
    pub fn to_outcome(&self) -> TxOutcome {
        TxOutcome::rejected(self.code(), self.to_string())
    }
}
