//! Request encoding
//!
//! A batch is posted as:
//! ```json
//! {"statements": [{"statement": "...", "parameters": {...}, "resultDataContents": ["REST"]}]}
//! ```
//! Field order inside each statement is fixed by the struct layout.

use super::error::WireError;
use graphtx_core::{Parameters, Value};
use serde::{Serialize, Serializer};

/// Row encodings the server can be asked to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultFormat {
    /// Legacy REST-style entity encoding
    #[serde(rename = "REST")]
    Rest,
}

/// One queued statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    /// Cypher text
    pub statement: String,
    /// Named parameters
    #[serde(serialize_with = "sorted_parameters")]
    pub parameters: Parameters,
    /// Requested row encodings
    #[serde(rename = "resultDataContents")]
    pub result_data_contents: Vec<ResultFormat>,
}

impl Statement {
    /// Create a statement requesting REST-encoded rows
    pub fn new(statement: impl Into<String>, parameters: Option<Parameters>) -> Self {
        Self {
            statement: statement.into(),
            parameters: parameters.unwrap_or_default(),
            result_data_contents: vec![ResultFormat::Rest],
        }
    }
}

#[derive(Serialize)]
struct Batch<'a> {
    statements: &'a [Statement],
}

fn sorted_parameters<S: Serializer>(params: &Parameters, serializer: S) -> Result<S::Ok, S::Error> {
    let sorted: std::collections::BTreeMap<&String, &Value> = params.iter().collect();
    sorted.serialize(serializer)
}

/// Encode a batch of statements as a request body
pub fn encode_batch(statements: &[Statement]) -> Result<String, WireError> {
    Ok(serde_json::to_string(&Batch { statements })?)
}
