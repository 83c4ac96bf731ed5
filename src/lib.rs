//! # graphtx
//!
//! Client-side transaction manager for Cypher over Neo4j's HTTP
//! transactional endpoint.
//!
//! A [`Session`] discovers the server's begin-transaction URI once. Each
//! [`Transaction`] it creates queues Cypher statements locally, ships them
//! in batches, and ends with a commit or a rollback.
//!
//! ## Quick Start
//!
//! ```ignore
//! use graphtx::prelude::*;
//!
//! let session = Session::open("http://localhost:7474")?;
//!
//! let mut tx = session.create_transaction();
//! tx.append("CREATE (a:Person {name: {name}}) RETURN a", Some(params))?;
//! tx.append("MATCH (a:Person) RETURN count(a)", None)?;
//! let results = tx.commit()?;
//!
//! for record in &results[1] {
//!     println!("{}", record);
//! }
//! ```
//!
//! ## Failure Model
//!
//! - Server-reported statement failures surface as [`Error::Transaction`];
//!   the transaction stays open until committed or rolled back.
//! - [`Transaction::commit`] and [`Transaction::rollback`] finish the
//!   transaction whatever the outcome.
//! - Any use of a finished transaction returns
//!   [`Error::TransactionFinished`].

#![warn(missing_docs)]

pub mod config;
pub mod discovery;
mod error;
mod session;
mod transaction;
pub mod transport;

pub mod prelude;

// Re-export main entry points
pub use session::{Session, SessionBuilder};
pub use transaction::{Results, Transaction};
pub use error::{Error, Result, TransactionError};

// Re-export configuration and transport
pub use config::ClientConfig;
pub use transport::{HttpTransport, Response, Transport, TransportError};

// Re-export types
pub use graphtx_core::{
    Classification, ErrorCode, Node, Parameters, Path, Record, Relationship, Value,
};
pub use graphtx_wire::{Hydrate, RestHydrator, WireError};
