//! Relationship model.

use crate::cypher::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directed, typed graph relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Option<i64>,
    pub start_node_id: Option<i64>,
    pub end_node_id: Option<i64>,
    /// Serialized as `type` to match Cypher naming.
    #[serde(rename = "type")]
    pub rel_type: String,
    pub properties: BTreeMap<String, Value>,
}

impl Relationship {
    pub fn new(rel_type: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
            ..Self::default()
        }
    }

    /// Sets both endpoint ids.
    pub fn between(mut self, start_node_id: i64, end_node_id: i64) -> Self {
        self.start_node_id = Some(start_node_id);
        self.end_node_id = Some(end_node_id);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
