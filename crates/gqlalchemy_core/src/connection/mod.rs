//! Database connection seam.
//!
//! # Responsibility
//! - Define the contract the query builder uses to run Cypher text.
//! - Keep driver/transport details outside the core crate.
//!
//! # Invariants
//! - `execute` is for statements whose rows are discarded.
//! - `execute_and_fetch` returns every row the statement produced, in order.

use crate::model::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod config;
pub mod scripted;

pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Failure while running a query against the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The server rejected or failed the query.
    Query { message: String },
    /// The connection itself failed (I/O, handshake, lost session).
    Transport(String),
    /// A fetched row lacks the requested column.
    MissingColumn(String),
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query { message } => write!(f, "query failed: {message}"),
            Self::Transport(message) => write!(f, "connection failed: {message}"),
            Self::MissingColumn(column) => write!(f, "result row has no column `{column}`"),
        }
    }
}

impl Error for ConnectionError {}

/// Executes Cypher text on a graph database.
pub trait Connection {
    /// Runs a query and discards any rows.
    fn execute(&self, query: &str) -> ConnectionResult<()>;

    /// Runs a query and returns all produced rows.
    fn execute_and_fetch(&self, query: &str) -> ConnectionResult<Vec<Record>>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn execute(&self, query: &str) -> ConnectionResult<()> {
        (**self).execute(query)
    }

    fn execute_and_fetch(&self, query: &str) -> ConnectionResult<Vec<Record>> {
        (**self).execute_and_fetch(query)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn execute(&self, query: &str) -> ConnectionResult<()> {
        (**self).execute(query)
    }

    fn execute_and_fetch(&self, query: &str) -> ConnectionResult<Vec<Record>> {
        (**self).execute_and_fetch(query)
    }
}
