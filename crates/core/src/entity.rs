//! Graph entities returned inside result rows
//!
//! Entities are identified by the numeric id the server embeds in their
//! resource URI (`.../node/42`, `.../relationship/7`).

use crate::value::Value;
use serde::Serialize;
use std::collections::HashMap;

/// A graph node
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Node {
    /// Server-assigned id
    pub id: i64,
    /// Resource URI the node was hydrated from
    pub uri: String,
    /// Labels attached to the node
    pub labels: Vec<String>,
    /// Property map
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// Check whether the node carries `label`
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Get a property by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A typed, directed relationship between two nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Relationship {
    /// Server-assigned id
    pub id: i64,
    /// Resource URI the relationship was hydrated from
    pub uri: String,
    /// Relationship type
    pub rel_type: String,
    /// Id of the start node
    pub start: i64,
    /// Id of the end node
    pub end: i64,
    /// Property map
    pub properties: HashMap<String, Value>,
}

impl Relationship {
    /// Get a property by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A path through the graph
///
/// The REST encoding only carries entity URIs for paths, so a path holds
/// node and relationship ids in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    /// Node ids, start to end
    pub nodes: Vec<i64>,
    /// Relationship ids, start to end
    pub relationships: Vec<i64>,
}

impl Path {
    /// Number of relationships in the path
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// True for a zero-length path (a single node)
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Id of the first node
    pub fn start(&self) -> Option<i64> {
        self.nodes.first().copied()
    }

    /// Id of the last node
    pub fn end(&self) -> Option<i64> {
        self.nodes.last().copied()
    }
}

/// Parse the trailing numeric id out of an entity URI
///
/// Returns `None` if the last path segment is not an integer.
///
/// ```
/// use graphtx_core::entity::id_from_uri;
///
/// assert_eq!(id_from_uri("http://localhost:7474/db/data/node/42"), Some(42));
/// assert_eq!(id_from_uri("http://localhost:7474/db/data/node/"), None);
/// ```
pub fn id_from_uri(uri: &str) -> Option<i64> {
    uri.rsplit('/').next()?.parse().ok()
}
