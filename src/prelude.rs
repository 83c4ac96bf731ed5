//! Convenient imports for graphtx.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use graphtx::prelude::*;
//!
//! let session = Session::open("http://localhost:7474")?;
//! let records = session.execute_committed("RETURN 1 AS x", None)?;
//! ```

// Main entry points
pub use crate::session::{Session, SessionBuilder};
pub use crate::transaction::{Results, Transaction};

// Error handling
pub use crate::error::{Error, Result, TransactionError};
pub use graphtx_core::ErrorCode;

// Core types
pub use graphtx_core::{Node, Parameters, Path, Record, Relationship, Value};

// Configuration
pub use crate::config::ClientConfig;
