//! Label chain and property map rendering for graph patterns.

use super::value::{map_literal, Value};
use std::collections::BTreeMap;

/// Renders labels as a `:A:B` chain.
///
/// Blank labels are skipped; returns an empty string when nothing remains.
pub fn to_cypher_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels
        .iter()
        .map(|label| label.as_ref().trim())
        .filter(|label| !label.is_empty())
        .map(|label| format!(":{label}"))
        .collect()
}

/// Renders a property map as `{key: value, ...}`.
///
/// Returns an empty string for an empty map so patterns stay bare.
pub fn to_cypher_properties(properties: &BTreeMap<String, Value>) -> String {
    if properties.is_empty() {
        return String::new();
    }
    map_literal(properties)
}
