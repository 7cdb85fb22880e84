//! Query types for the corpus sync system.
//!
//! The sync engine only needs two query shapes: match-everything for counting
//! and exporting, and a single-field equality filter for point lookups.

use serde_json::{json, Map, Value};

/// A minimal query over an index.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Matches every document in the index.
    MatchAll,
    /// Matches documents whose `field` equals `value`.
    Term {
        /// Field name to filter on.
        field: String,
        /// Value the field must match.
        value: Value,
    },
}

impl Query {
    /// Create an equality filter on a single field.
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Render the query clause in the store's query DSL.
    pub fn to_dsl(&self) -> Value {
        match self {
            Query::MatchAll => json!({ "match_all": {} }),
            Query::Term { field, value } => {
                let mut clause = Map::new();
                clause.insert(field.clone(), value.clone());
                json!({ "match": Value::Object(clause) })
            }
        }
    }
}
