//! Unified error types for graphtx.
//!
//! Four kinds of failure reach callers:
//!
//! - capability negotiation at session construction ([`Error::UnsupportedServer`])
//! - use of a transaction after commit or rollback ([`Error::TransactionFinished`])
//! - statement failures reported by the server ([`Error::Transaction`])
//! - transport and payload failures, passed through unchanged
//!   ([`Error::Transport`], [`Error::Decode`])

use crate::transport::TransportError;
use graphtx_core::ErrorCode;
use graphtx_wire::WireError;
use std::fmt;
use thiserror::Error;

/// All graphtx errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The server does not advertise transactional Cypher execution
    #[error("Cypher transactions are not supported by the server at {uri}")]
    UnsupportedServer {
        /// Service root that was queried
        uri: String,
    },

    /// The transaction has already been committed or rolled back
    #[error("transaction finished")]
    TransactionFinished,

    /// The server reported a statement failure
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// The HTTP exchange failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server's payload could not be interpreted
    #[error(transparent)]
    Decode(#[from] WireError),

    /// The connection string could not be parsed
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for graphtx operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a use-after-finish error.
    pub fn is_finished(&self) -> bool {
        matches!(self, Error::TransactionFinished)
    }

    /// Check if this is a server-reported statement failure.
    pub fn is_transaction_error(&self) -> bool {
        matches!(self, Error::Transaction(_))
    }

    /// The server status code, for statement failures.
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Error::Transaction(e) => Some(&e.code),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only transient-class server failures (deadlocks and the like) may
    /// succeed when the work is repeated in a fresh transaction.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transaction(e) if e.code.is_transient())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUri(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// A statement failure reported by the server.
///
/// Only the first error of a response is surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionError {
    /// Discriminator parsed from the server's status code
    pub code: ErrorCode,
    /// Server message
    pub message: String,
}

impl TransactionError {
    /// Build from the raw code string and message
    pub fn new(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.title(), self.message)
    }
}

impl std::error::Error for TransactionError {}
