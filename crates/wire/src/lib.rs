//! Wire encoding for graphtx
//!
//! This crate implements the JSON contract spoken with the server's
//! transactional Cypher endpoint.
//!
//! ## Request
//!
//! ```json
//! {"statements": [{"statement": "MATCH (n) RETURN n", "parameters": {}, "resultDataContents": ["REST"]}]}
//! ```
//!
//! ## Response
//!
//! ```json
//! {"results": [{"columns": ["n"], "data": [{"rest": [{"self": "...", "data": {}}]}]}],
//!  "commit": "http://localhost:7474/db/data/transaction/1/commit",
//!  "errors": []}
//! ```
//!
//! ## Examples
//!
//! ```
//! use graphtx_wire::{decode_response, encode_batch, Hydrate, RestHydrator, Statement};
//! use graphtx_core::Value;
//!
//! let body = encode_batch(&[Statement::new("RETURN 1", None)]).unwrap();
//! assert!(body.starts_with(r#"{"statements":[{"statement":"RETURN 1""#));
//!
//! let rs = decode_response(r#"{"results":[{"columns":["x"],"data":[{"rest":[1]}]}],"errors":[]}"#).unwrap();
//! let cells = RestHydrator.hydrate_row(&rs.results[0].data[0], 1).unwrap();
//! assert_eq!(cells, vec![Value::Int(1)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

pub use json::{
    decode_response, decode_service_document, encode_batch, Hydrate, RawRow, RestHydrator,
    ResultFormat, ServerError, ServiceDocument, Statement, StatementResult, TransactionInfo,
    TransactionResponse, WireError,
};
