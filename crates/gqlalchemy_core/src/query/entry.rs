//! Entry points that start a builder with its first clause.
//!
//! `entry::match_().node(..)` reads like the Cypher it renders.

use crate::query::builder::{collect_projections, QueryBuilder};
use crate::query::clause::Clause;

/// Starts a query with `CREATE`.
pub fn create() -> QueryBuilder {
    QueryBuilder::starting_with(Clause::Create)
}

/// Starts a query with `MATCH`.
pub fn match_() -> QueryBuilder {
    QueryBuilder::starting_with(Clause::Match { optional: false })
}

/// Starts a query with `OPTIONAL MATCH`.
pub fn optional_match() -> QueryBuilder {
    QueryBuilder::starting_with(Clause::Match { optional: true })
}

/// Starts a query with `MERGE`.
pub fn merge() -> QueryBuilder {
    QueryBuilder::starting_with(Clause::Merge)
}

/// Starts a query with `CALL procedure(arguments)`.
pub fn call(procedure: impl Into<String>, arguments: Option<&str>) -> QueryBuilder {
    QueryBuilder::starting_with(Clause::Call {
        procedure: procedure.into(),
        arguments: arguments.map(str::to_string),
    })
}

/// Starts a query with `UNWIND list_expression AS variable`.
pub fn unwind(list_expression: impl Into<String>, variable: impl Into<String>) -> QueryBuilder {
    QueryBuilder::starting_with(Clause::Unwind {
        list_expression: list_expression.into(),
        variable: variable.into(),
    })
}

/// Starts a query with `WITH`.
pub fn with_<I, E, A>(projections: I) -> QueryBuilder
where
    I: IntoIterator<Item = (E, A)>,
    E: Into<String>,
    A: Into<String>,
{
    QueryBuilder::starting_with(Clause::With(collect_projections(projections)))
}
