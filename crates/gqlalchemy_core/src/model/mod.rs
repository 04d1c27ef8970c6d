//! Graph entity models shared by the query builder and fetched results.
//!
//! # Responsibility
//! - Describe nodes and relationships independent of any driver.
//! - Provide the record shape returned by `Connection::execute_and_fetch`.
//!
//! # Invariants
//! - Labels and properties are ordered collections, so rendering is stable.
//! - `id` fields are `None` until a database assigns them.

pub mod node;
pub mod relationship;

use crate::cypher::value::Value;
use std::collections::BTreeMap;

pub use node::Node;
pub use relationship::Relationship;

/// One fetched result row keyed by projected column name.
pub type Record = BTreeMap<String, Value>;
