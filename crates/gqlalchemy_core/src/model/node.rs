//! Node model.

use crate::cypher::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Graph node with labels and a property map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Database-internal id; `None` for nodes not read from the database.
    pub id: Option<i64>,
    pub labels: BTreeSet<String>,
    pub properties: BTreeMap<String, Value>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one label; blank labels are ignored.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.labels.insert(label.trim().to_string());
        }
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
