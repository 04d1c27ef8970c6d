//! Core library for GQLAlchemy.
//! Builds Cypher queries declaratively and runs them through a pluggable
//! graph database connection.

pub mod connection;
pub mod cypher;
pub mod logging;
pub mod model;
pub mod query;

pub use connection::config::{ConfigError, ConfigResult, ConnectionConfig};
pub use connection::scripted::ScriptedConnection;
pub use connection::{Connection, ConnectionError, ConnectionResult};
pub use cypher::format::{to_cypher_labels, to_cypher_properties};
pub use cypher::value::{to_cypher_value, Value};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::{Node, Record, Relationship};
pub use query::builder::{EdgePattern, NodePattern, QueryBuilder};
pub use query::clause::{Clause, ClauseKind};
pub use query::{BuildError, BuildResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
