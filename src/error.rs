//! Typed failure taxonomy for the rebalancing engine
//!
//! The engine never logs or formats for presentation; it returns one of
//! these and the transport layer decides the user-visible mapping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Referenced index does not exist
    #[error("index not found: {0}")]
    IndexNotFound(String),

    /// Referenced share is not a constituent of the targeted index (or, for
    /// dividends, of any index)
    #[error("share not found: {0}")]
    ShareNotFound(String),

    /// Input was well-formed but semantically unacceptable, e.g. a negative
    /// dividend or one exceeding the current share price
    #[error("{0}")]
    InvalidArgument(String),

    /// Current registry state forbids the operation, e.g. deleting from an
    /// index that would fall below the two-member minimum
    #[error("{0}")]
    PreconditionFailed(String),
}
