//! Response decoding
//!
//! Submission responses have the shape:
//! ```json
//! {
//!   "results": [{"columns": ["n"], "data": [{"rest": [...]}]}],
//!   "commit": "http://host/db/data/transaction/5/commit",
//!   "transaction": {"expires": "Tue, 10 Jun 2014 12:00:00 +0000"},
//!   "errors": [{"code": "Neo.ClientError...", "message": "..."}]
//! }
//! ```
//! Every field is optional on the wire; absent lists decode as empty.

use super::error::WireError;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Decoded body of a begin/execute/commit response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionResponse {
    /// One entry per submitted statement, in submission order
    #[serde(default)]
    pub results: Vec<StatementResult>,
    /// Commit URI for this transaction, when the server reveals it
    #[serde(default)]
    pub commit: Option<String>,
    /// Transaction metadata
    #[serde(default)]
    pub transaction: Option<TransactionInfo>,
    /// Statement-level failures
    #[serde(default)]
    pub errors: Vec<ServerError>,
}

/// Result of a single statement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatementResult {
    /// Column names
    #[serde(default)]
    pub columns: Vec<String>,
    /// Rows
    #[serde(default)]
    pub data: Vec<RawRow>,
}

/// One row as sent by the server, before hydration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    /// REST-encoded cells, one per column
    #[serde(default)]
    pub rest: Vec<JsonValue>,
}

/// Server-side transaction metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInfo {
    /// When the server will expire the transaction if left idle
    #[serde(default)]
    pub expires: Option<String>,
}

/// A statement failure reported inline in the response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerError {
    /// Status code, e.g. `Neo.ClientError.Statement.SyntaxError`; empty if
    /// the server sent none
    #[serde(default)]
    pub code: String,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// Service root or graph metadata document used during discovery
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceDocument {
    /// Link from the service root to the graph metadata document
    #[serde(default)]
    pub data: Option<String>,
    /// Begin-transaction URI; absent on servers without transactional support
    #[serde(default)]
    pub transaction: Option<String>,
    /// Server version string
    #[serde(default)]
    pub neo4j_version: Option<String>,
}

/// Decode a begin/execute/commit response body
pub fn decode_response(body: &str) -> Result<TransactionResponse, WireError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode a discovery document
pub fn decode_service_document(body: &str) -> Result<ServiceDocument, WireError> {
    Ok(serde_json::from_str(body)?)
}
