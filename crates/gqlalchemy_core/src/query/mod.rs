//! Declarative Cypher query construction.
//!
//! # Responsibility
//! - Model each Cypher clause as a typed partial query.
//! - Chain partial queries into a complete statement and execute it.
//!
//! # Invariants
//! - A node pattern never directly follows a node pattern; an edge pattern
//!   never directly follows an edge pattern.
//! - Construction is pure; only `execute`/`get_single` touch a connection.

use crate::query::clause::ClauseKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod builder;
pub mod clause;
pub mod entry;

pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while chaining partial queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A node or edge pattern was appended directly after one of the same kind.
    InvalidMatchChain { kind: ClauseKind },
    /// `WHERE`-family condition used an operator Cypher does not know.
    UnknownOperator(String),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMatchChain { kind } => {
                write!(f, "invalid match query when linking: {kind} cannot follow {kind}")
            }
            Self::UnknownOperator(operator) => {
                write!(f, "unknown comparison operator `{operator}`")
            }
        }
    }
}

impl Error for BuildError {}
