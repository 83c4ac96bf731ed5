//! Core types for graphtx
//!
//! This crate defines the types shared by the wire layer and the
//! transaction layer:
//! - [`Value`]: the value model for parameters and result cells
//! - [`Node`], [`Relationship`], [`Path`]: graph entities inside results
//! - [`Record`] and [`RecordProducer`]: named-field result rows
//! - [`ErrorCode`]: discriminator for server-reported statement failures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error_code;
pub mod record;
pub mod value;

pub use entity::{Node, Path, Relationship};
pub use error_code::{Classification, ErrorCode};
pub use record::{Record, RecordProducer};
pub use value::{Parameters, Value};
