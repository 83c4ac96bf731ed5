//! Hydration of REST-encoded cells into [`Value`]s
//!
//! The REST encoding represents graph entities as JSON objects carrying
//! their own resource URI:
//!
//! | Shape | Hydrates to |
//! |-------|-------------|
//! | `{"self", "type", "start", "end", "data"}` | `Relationship` |
//! | `{"self", "data", "metadata"?}` | `Node` |
//! | `{"nodes", "relationships", "start", "end", "length"}` | `Path` |
//! | any other object | `Map` |
//!
//! Scalars and lists map directly; integers that do not fit `i64` become
//! floats.

use super::decode::RawRow;
use super::error::WireError;
use graphtx_core::entity::id_from_uri;
use graphtx_core::{Node, Path, Relationship, Value};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Converts server-encoded cells into values
pub trait Hydrate: Send + Sync {
    /// Hydrate a single cell
    fn hydrate(&self, raw: &JsonValue) -> Result<Value, WireError>;

    /// Hydrate every cell of a row, checking it against the column count
    fn hydrate_row(&self, row: &RawRow, width: usize) -> Result<Vec<Value>, WireError> {
        if row.rest.len() != width {
            return Err(WireError::RowWidth {
                expected: width,
                actual: row.rest.len(),
            });
        }
        row.rest.iter().map(|cell| self.hydrate(cell)).collect()
    }
}

/// Hydrator for the `REST` result data format
#[derive(Debug, Clone, Copy, Default)]
pub struct RestHydrator;

impl Hydrate for RestHydrator {
    fn hydrate(&self, raw: &JsonValue) -> Result<Value, WireError> {
        match raw {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => Ok(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            JsonValue::String(s) => Ok(Value::String(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.hydrate(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            JsonValue::Object(obj) => self.hydrate_object(obj),
        }
    }
}

impl RestHydrator {
    fn hydrate_object(&self, obj: &Map<String, JsonValue>) -> Result<Value, WireError> {
        if is_path(obj) {
            return hydrate_path(obj).map(Value::Path);
        }
        if obj.contains_key("self") {
            if obj.contains_key("type") && obj.contains_key("start") && obj.contains_key("end") {
                return self.hydrate_relationship(obj).map(Value::Relationship);
            }
            if obj.contains_key("data") {
                return self.hydrate_node(obj).map(Value::Node);
            }
        }
        self.hydrate_properties(obj).map(Value::Map)
    }

    fn hydrate_node(&self, obj: &Map<String, JsonValue>) -> Result<Node, WireError> {
        let uri = str_field(obj, "self", "node")?;
        let metadata = obj.get("metadata").and_then(JsonValue::as_object);
        let id = metadata
            .and_then(|m| m.get("id"))
            .and_then(JsonValue::as_i64)
            .or_else(|| id_from_uri(uri))
            .ok_or_else(|| WireError::entity("node", format!("no id in {}", uri)))?;
        let labels = metadata
            .and_then(|m| m.get("labels"))
            .and_then(JsonValue::as_array)
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Node {
            id,
            uri: uri.to_string(),
            labels,
            properties: self.data_field(obj, "node")?,
        })
    }

    fn hydrate_relationship(&self, obj: &Map<String, JsonValue>) -> Result<Relationship, WireError> {
        let uri = str_field(obj, "self", "relationship")?;
        let id = obj
            .get("metadata")
            .and_then(|m| m.get("id"))
            .and_then(JsonValue::as_i64)
            .or_else(|| id_from_uri(uri))
            .ok_or_else(|| WireError::entity("relationship", format!("no id in {}", uri)))?;

        Ok(Relationship {
            id,
            uri: uri.to_string(),
            rel_type: str_field(obj, "type", "relationship")?.to_string(),
            start: uri_id(obj, "start", "relationship")?,
            end: uri_id(obj, "end", "relationship")?,
            properties: self.data_field(obj, "relationship")?,
        })
    }

    fn data_field(
        &self,
        obj: &Map<String, JsonValue>,
        kind: &'static str,
    ) -> Result<HashMap<String, Value>, WireError> {
        match obj.get("data") {
            None | Some(JsonValue::Null) => Ok(HashMap::new()),
            Some(JsonValue::Object(data)) => self.hydrate_properties(data),
            Some(other) => Err(WireError::entity(
                kind,
                format!("data must be an object, got {}", other),
            )),
        }
    }

    fn hydrate_properties(
        &self,
        obj: &Map<String, JsonValue>,
    ) -> Result<HashMap<String, Value>, WireError> {
        obj.iter()
            .map(|(k, v)| self.hydrate(v).map(|v| (k.clone(), v)))
            .collect()
    }
}

fn is_path(obj: &Map<String, JsonValue>) -> bool {
    ["nodes", "relationships", "start", "end", "length"]
        .iter()
        .all(|k| obj.contains_key(*k))
}

fn hydrate_path(obj: &Map<String, JsonValue>) -> Result<Path, WireError> {
    Ok(Path {
        nodes: uri_list(obj, "nodes")?,
        relationships: uri_list(obj, "relationships")?,
    })
}

fn str_field<'a>(
    obj: &'a Map<String, JsonValue>,
    key: &str,
    kind: &'static str,
) -> Result<&'a str, WireError> {
    obj.get(key)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| WireError::entity(kind, format!("missing string field '{}'", key)))
}

fn uri_id(obj: &Map<String, JsonValue>, key: &str, kind: &'static str) -> Result<i64, WireError> {
    let uri = str_field(obj, key, kind)?;
    id_from_uri(uri).ok_or_else(|| WireError::entity(kind, format!("no id in {}", uri)))
}

fn uri_list(obj: &Map<String, JsonValue>, key: &str) -> Result<Vec<i64>, WireError> {
    let items = obj
        .get(key)
        .and_then(JsonValue::as_array)
        .ok_or_else(|| WireError::entity("path", format!("'{}' must be a list", key)))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .and_then(id_from_uri)
                .ok_or_else(|| WireError::entity("path", format!("bad entity URI {}", item)))
        })
        .collect()
}
