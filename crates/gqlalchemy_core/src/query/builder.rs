//! Fluent query builder over partial queries.
//!
//! # Responsibility
//! - Append typed clauses in call order.
//! - Assemble the final Cypher text and hand it to a `Connection`.
//!
//! # Invariants
//! - Failing chain methods consume the builder; no partially chained query
//!   can be executed afterwards.
//! - `fetch_results` is set only by `return_` or custom text containing
//!   ` RETURN `.

use crate::connection::{Connection, ConnectionError, ConnectionResult};
use crate::cypher::format::{to_cypher_labels, to_cypher_properties};
use crate::cypher::value::{to_cypher_value, Value};
use crate::model::{Node, Record, Relationship};
use crate::query::clause::{Clause, ClauseKind, EdgeDirection, Projections, WhereKeyword};
use crate::query::{BuildError, BuildResult};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Instant;

static REPEATED_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\s+").expect("whitespace pattern is valid"));

const SUPPORTED_OPERATORS: &[&str] = &[
    "=",
    "<>",
    "!=",
    "<",
    ">",
    "<=",
    ">=",
    "=~",
    ":",
    "IN",
    "STARTS WITH",
    "ENDS WITH",
    "CONTAINS",
    "IS",
    "IS NOT",
];

/// Node pattern input for [`QueryBuilder::node`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePattern {
    variable: Option<String>,
    labels: Vec<String>,
    properties: BTreeMap<String, Value>,
}

impl NodePattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies labels and properties from an existing node.
    pub fn from_node(node: &Node) -> Self {
        Self {
            variable: None,
            labels: node.labels.iter().cloned().collect(),
            properties: node.properties.clone(),
        }
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Edge pattern input for [`QueryBuilder::to`] and [`QueryBuilder::from`].
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePattern {
    variable: Option<String>,
    edge_type: Option<String>,
    properties: BTreeMap<String, Value>,
    directed: bool,
}

impl Default for EdgePattern {
    fn default() -> Self {
        Self {
            variable: None,
            edge_type: None,
            properties: BTreeMap::new(),
            directed: true,
        }
    }
}

impl EdgePattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies type and properties from an existing relationship.
    pub fn from_relationship(relationship: &Relationship) -> Self {
        Self {
            edge_type: Some(relationship.rel_type.clone()),
            properties: relationship.properties.clone(),
            ..Self::default()
        }
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn edge_type(mut self, edge_type: impl Into<String>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Renders as `-[...]-` regardless of `to`/`from`.
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }
}

/// Declarative Cypher query builder.
///
/// ```
/// use gqlalchemy_core::{NodePattern, QueryBuilder};
///
/// let query = QueryBuilder::new()
///     .match_()
///     .node(NodePattern::new().variable("n").label("User"))?
///     .return_all()
///     .construct_query();
/// assert_eq!(query, " MATCH (n:User) RETURN * ");
/// # Ok::<(), gqlalchemy_core::BuildError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    clauses: Vec<Clause>,
    fetch_results: bool,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn starting_with(clause: Clause) -> Self {
        Self::new().push(clause)
    }

    fn push(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Appended clauses in call order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn match_(self) -> Self {
        self.push(Clause::Match { optional: false })
    }

    pub fn optional_match(self) -> Self {
        self.push(Clause::Match { optional: true })
    }

    pub fn merge(self) -> Self {
        self.push(Clause::Merge)
    }

    pub fn create(self) -> Self {
        self.push(Clause::Create)
    }

    /// Appends `CALL procedure(arguments)`.
    pub fn call(self, procedure: impl Into<String>, arguments: Option<&str>) -> Self {
        self.push(Clause::Call {
            procedure: procedure.into(),
            arguments: arguments.map(str::to_string),
        })
    }

    /// Appends a node pattern.
    ///
    /// # Errors
    /// - `BuildError::InvalidMatchChain` when the previous clause is a node.
    pub fn node(self, pattern: NodePattern) -> BuildResult<Self> {
        self.ensure_linkable(ClauseKind::Node)?;
        Ok(self.push(Clause::Node {
            variable: pattern.variable,
            labels: to_cypher_labels(&pattern.labels),
            properties: to_cypher_properties(&pattern.properties),
        }))
    }

    /// Appends an outgoing (`-[]->`) edge pattern.
    ///
    /// # Errors
    /// - `BuildError::InvalidMatchChain` when the previous clause is an edge.
    pub fn to(self, pattern: EdgePattern) -> BuildResult<Self> {
        self.edge(pattern, EdgeDirection::Outgoing)
    }

    /// Appends an incoming (`<-[]-`) edge pattern.
    ///
    /// # Errors
    /// - `BuildError::InvalidMatchChain` when the previous clause is an edge.
    pub fn from(self, pattern: EdgePattern) -> BuildResult<Self> {
        self.edge(pattern, EdgeDirection::Incoming)
    }

    fn edge(self, pattern: EdgePattern, direction: EdgeDirection) -> BuildResult<Self> {
        self.ensure_linkable(ClauseKind::Edge)?;
        let types = pattern
            .edge_type
            .as_deref()
            .map(|edge_type| to_cypher_labels(&[edge_type]))
            .unwrap_or_default();
        let direction = if pattern.directed {
            direction
        } else {
            EdgeDirection::Undirected
        };
        Ok(self.push(Clause::Edge {
            variable: pattern.variable,
            types,
            properties: to_cypher_properties(&pattern.properties),
            direction,
        }))
    }

    /// Appends `WHERE item operator value`.
    pub fn where_(self, item: &str, operator: &str, value: impl Into<Value>) -> BuildResult<Self> {
        self.condition(WhereKeyword::Where, item, operator, value.into())
    }

    /// Appends `AND item operator value`.
    pub fn and_where(
        self,
        item: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> BuildResult<Self> {
        self.condition(WhereKeyword::And, item, operator, value.into())
    }

    /// Appends `OR item operator value`.
    pub fn or_where(self, item: &str, operator: &str, value: impl Into<Value>) -> BuildResult<Self> {
        self.condition(WhereKeyword::Or, item, operator, value.into())
    }

    /// Appends `XOR item operator value`.
    pub fn xor_where(
        self,
        item: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> BuildResult<Self> {
        self.condition(WhereKeyword::Xor, item, operator, value.into())
    }

    fn condition(
        self,
        keyword: WhereKeyword,
        item: &str,
        operator: &str,
        value: Value,
    ) -> BuildResult<Self> {
        let operator = normalize_operator(operator)?;
        let value = to_cypher_value(&value);
        let condition = if operator == ":" {
            format!("{item}:{value}")
        } else {
            format!("{item} {operator} {value}")
        };
        Ok(self.push(Clause::Where { keyword, condition }))
    }

    pub fn unwind(self, list_expression: impl Into<String>, variable: impl Into<String>) -> Self {
        self.push(Clause::Unwind {
            list_expression: list_expression.into(),
            variable: variable.into(),
        })
    }

    /// Appends `WITH`; an empty projection list renders `WITH *`.
    pub fn with_<I, E, A>(self, projections: I) -> Self
    where
        I: IntoIterator<Item = (E, A)>,
        E: Into<String>,
        A: Into<String>,
    {
        self.push(Clause::With(collect_projections(projections)))
    }

    /// Appends `UNION ALL` when `include_duplicates`, otherwise `UNION`.
    pub fn union(self, include_duplicates: bool) -> Self {
        self.push(Clause::Union { include_duplicates })
    }

    pub fn delete<I, S>(self, expressions: I, detach: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Clause::Delete {
            expressions: expressions.into_iter().map(Into::into).collect(),
            detach,
        })
    }

    pub fn remove<I, S>(self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Clause::Remove(items.into_iter().map(Into::into).collect()))
    }

    /// Appends `YIELD`; an empty projection list renders `YIELD *`.
    pub fn yield_<I, E, A>(self, projections: I) -> Self
    where
        I: IntoIterator<Item = (E, A)>,
        E: Into<String>,
        A: Into<String>,
    {
        self.push(Clause::Yield(collect_projections(projections)))
    }

    /// Appends `RETURN` and marks the query as result-producing.
    pub fn return_<I, E, A>(mut self, projections: I) -> Self
    where
        I: IntoIterator<Item = (E, A)>,
        E: Into<String>,
        A: Into<String>,
    {
        self.fetch_results = true;
        self.push(Clause::Return(collect_projections(projections)))
    }

    /// Appends `RETURN *`.
    pub fn return_all(self) -> Self {
        self.return_(std::iter::empty::<(String, String)>())
    }

    pub fn order_by(self, properties: impl Into<String>) -> Self {
        self.push(Clause::OrderBy(properties.into()))
    }

    pub fn limit(self, integer_expression: impl Into<String>) -> Self {
        self.push(Clause::Limit(integer_expression.into()))
    }

    pub fn skip(self, integer_expression: impl Into<String>) -> Self {
        self.push(Clause::Skip(integer_expression.into()))
    }

    /// Appends raw Cypher text verbatim.
    pub fn add_custom_cypher(mut self, custom_cypher: impl Into<String>) -> Self {
        let custom_cypher = custom_cypher.into();
        if custom_cypher.contains(" RETURN ") {
            self.fetch_results = true;
        }
        self.push(Clause::Custom(custom_cypher))
    }

    /// Appends `LOAD CSV FROM 'path' WITH|NO HEADER AS row`.
    pub fn load_csv(self, path: impl Into<String>, header: bool, row: impl Into<String>) -> Self {
        self.push(Clause::LoadCsv {
            path: path.into(),
            header,
            row: row.into(),
        })
    }

    /// Whether `execute` fetches rows instead of running fire-and-forget.
    pub fn fetches_results(&self) -> bool {
        self.fetch_results
    }

    /// Returns whether any node or edge pattern binds a variable.
    pub fn any_variables_matched(&self) -> bool {
        self.clauses.iter().any(|clause| {
            matches!(clause.kind(), ClauseKind::Node | ClauseKind::Edge)
                && clause.variable().is_some_and(|variable| !variable.is_empty())
        })
    }

    /// Assembles the Cypher text, collapsing whitespace runs to one space.
    pub fn construct_query(&self) -> String {
        let joined = self.clauses.iter().map(Clause::render).collect::<String>();
        REPEATED_WHITESPACE.replace_all(&joined, " ").into_owned()
    }

    /// Executes the query on `conn`.
    ///
    /// Result-producing queries return fetched records; other queries
    /// return an empty list once the server accepted them.
    ///
    /// # Side effects
    /// - Emits `query_execute` logging events with duration and status.
    pub fn execute<C>(&self, conn: &C) -> ConnectionResult<Vec<Record>>
    where
        C: Connection + ?Sized,
    {
        self.run(conn, self.fetch_results)
    }

    /// Executes the query and returns column `retrieve` of the first row.
    ///
    /// Always fetches, so `CALL ... YIELD` queries without `RETURN` still
    /// produce rows. Returns `Ok(None)` when the query yields no rows.
    ///
    /// # Errors
    /// - `ConnectionError::MissingColumn` when the first row lacks `retrieve`.
    pub fn get_single<C>(&self, conn: &C, retrieve: &str) -> ConnectionResult<Option<Value>>
    where
        C: Connection + ?Sized,
    {
        let Some(mut record) = self.run(conn, true)?.into_iter().next() else {
            return Ok(None);
        };
        record
            .remove(retrieve)
            .map(Some)
            .ok_or_else(|| ConnectionError::MissingColumn(retrieve.to_string()))
    }

    fn run<C>(&self, conn: &C, fetch: bool) -> ConnectionResult<Vec<Record>>
    where
        C: Connection + ?Sized,
    {
        let query = self.construct_query();
        let started_at = Instant::now();
        debug!("event=query_execute module=query status=start query={query}");

        let outcome = if fetch {
            conn.execute_and_fetch(&query)
        } else {
            conn.execute(&query).map(|()| Vec::new())
        };

        match &outcome {
            Ok(records) => info!(
                "event=query_execute module=query status=ok fetch={} rows={} query_len={} duration_ms={}",
                fetch,
                records.len(),
                query.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=query_execute module=query status=error fetch={} query_len={} duration_ms={} error={}",
                fetch,
                query.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }

        outcome
    }

    fn ensure_linkable(&self, kind: ClauseKind) -> BuildResult<()> {
        match self.clauses.last() {
            Some(previous) if previous.kind() == kind => {
                Err(BuildError::InvalidMatchChain { kind })
            }
            _ => Ok(()),
        }
    }
}

pub(crate) fn collect_projections<I, E, A>(projections: I) -> Projections
where
    I: IntoIterator<Item = (E, A)>,
    E: Into<String>,
    A: Into<String>,
{
    projections
        .into_iter()
        .map(|(expression, alias)| (expression.into(), alias.into()))
        .collect()
}

fn normalize_operator(operator: &str) -> BuildResult<String> {
    let normalized = operator
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase();
    if SUPPORTED_OPERATORS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(BuildError::UnknownOperator(operator.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_operator;
    use crate::query::BuildError;

    #[test]
    fn normalize_operator_accepts_word_operators_in_any_case() {
        assert_eq!(normalize_operator("starts  with").unwrap(), "STARTS WITH");
        assert_eq!(normalize_operator(" >= ").unwrap(), ">=");
    }

    #[test]
    fn normalize_operator_rejects_unknown_tokens() {
        let err = normalize_operator("LIKE").unwrap_err();
        assert_eq!(err, BuildError::UnknownOperator("LIKE".to_string()));
    }
}
