//! Records: named-field projections of result rows

use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One result row, keyed by column name
///
/// All records produced for the same statement share one column list.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    /// Column names, in result order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values, in column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    /// Get a value by column position
    pub fn get_index(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Consume the record into a column -> value map
    pub fn into_map(self) -> HashMap<String, Value> {
        self.columns.iter().cloned().zip(self.values).collect()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record(")?;
        for (i, (column, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={:?}", column, value)?;
        }
        write!(f, ")")
    }
}

/// Projects hydrated rows onto a fixed column list
#[derive(Debug, Clone)]
pub struct RecordProducer {
    columns: Arc<[String]>,
}

impl RecordProducer {
    /// Create a producer for the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns: columns.into(),
        }
    }

    /// Column names this producer projects onto
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Build a record from one hydrated row
    ///
    /// `values` is expected to hold one value per column; callers validate
    /// row width before projecting.
    pub fn produce(&self, values: Vec<Value>) -> Record {
        Record {
            columns: Arc::clone(&self.columns),
            values,
        }
    }
}
