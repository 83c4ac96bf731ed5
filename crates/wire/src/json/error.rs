//! Wire error types

use thiserror::Error;

/// Failure to encode a request or interpret a server payload
#[derive(Debug, Error)]
pub enum WireError {
    /// Body was not valid JSON, or did not match the expected shape
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A result row had a different number of cells than the result has columns
    #[error("row has {actual} values but result has {expected} columns")]
    RowWidth {
        /// Number of columns
        expected: usize,
        /// Number of cells in the row
        actual: usize,
    },

    /// An entity object could not be hydrated
    #[error("invalid {kind}: {reason}")]
    InvalidEntity {
        /// Entity kind ("node", "relationship", "path")
        kind: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl WireError {
    pub(crate) fn entity(kind: &'static str, reason: impl Into<String>) -> Self {
        WireError::InvalidEntity {
            kind,
            reason: reason.into(),
        }
    }
}
