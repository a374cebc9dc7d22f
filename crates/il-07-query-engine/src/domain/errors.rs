//! Query failures. Anything here becomes the query's log text; an empty
//! result is not an error.

use il_01_entity_store::StoreError;
use il_03_node_registry::ResolveError;
use shared_types::LedgerError;
use thiserror::Error;

/// Why a query could not be answered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// No projection by that name.
    #[error("Unknown query method: {0}")]
    UnknownMethod(String),

    /// Params are not valid JSON for the query.
    #[error("Invalid parameters for {method}: {reason}")]
    InvalidParams {
        /// Query name.
        method: String,
        /// Decoder message.
        reason: String,
    },

    /// Lookup rule violated, e.g. both a code and an identity given.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Proxy link could not be followed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Result could not be encoded.
    #[error("Cannot render result: {0}")]
    Render(String),
}
