//! Partial queries and their Cypher fragments.
//!
//! # Responsibility
//! - Hold the already-rendered pieces of one clause (labels, property maps,
//!   conditions) until the full query is assembled.
//! - Render each clause into a whitespace-padded fragment.
//!
//! # Invariants
//! - Keyword clauses render surrounded by spaces; pattern clauses (nodes,
//!   edges) render without padding so `(a)-[]->(b)` stays contiguous.
//! - `Custom` fragments are emitted exactly as given.

use crate::cypher::value::quote_string;
use std::fmt::{Display, Formatter};

/// Discriminant of a partial query, used for chaining checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    AndWhere,
    Call,
    Create,
    Custom,
    Delete,
    Edge,
    Limit,
    LoadCsv,
    Match,
    Merge,
    Node,
    OrderBy,
    OrWhere,
    Remove,
    Return,
    Skip,
    Union,
    Unwind,
    Where,
    With,
    Yield,
    XorWhere,
}

impl ClauseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AndWhere => "AND_WHERE",
            Self::Call => "CALL",
            Self::Create => "CREATE",
            Self::Custom => "CUSTOM",
            Self::Delete => "DELETE",
            Self::Edge => "EDGE",
            Self::Limit => "LIMIT",
            Self::LoadCsv => "LOAD_CSV",
            Self::Match => "MATCH",
            Self::Merge => "MERGE",
            Self::Node => "NODE",
            Self::OrderBy => "ORDER_BY",
            Self::OrWhere => "OR_WHERE",
            Self::Remove => "REMOVE",
            Self::Return => "RETURN",
            Self::Skip => "SKIP",
            Self::Union => "UNION",
            Self::Unwind => "UNWIND",
            Self::Where => "WHERE",
            Self::With => "WITH",
            Self::Yield => "YIELD",
            Self::XorWhere => "XOR_WHERE",
        }
    }
}

impl Display for ClauseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean connective that opens a condition clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereKeyword {
    Where,
    And,
    Or,
    Xor,
}

impl WhereKeyword {
    fn as_str(self) -> &'static str {
        match self {
            Self::Where => "WHERE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
        }
    }

    fn kind(self) -> ClauseKind {
        match self {
            Self::Where => ClauseKind::Where,
            Self::And => ClauseKind::AndWhere,
            Self::Or => ClauseKind::OrWhere,
            Self::Xor => ClauseKind::XorWhere,
        }
    }
}

/// Arrow shape of an edge pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// `-[]->`
    Outgoing,
    /// `<-[]-`
    Incoming,
    /// `-[]-`
    Undirected,
}

/// Ordered `(expression, alias)` pairs for `WITH`/`YIELD`/`RETURN`.
pub type Projections = Vec<(String, String)>;

/// One partial query.
///
/// Pattern clauses keep labels/properties as pre-rendered Cypher text.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    LoadCsv {
        path: String,
        header: bool,
        row: String,
    },
    Match {
        optional: bool,
    },
    Merge,
    Create,
    Call {
        procedure: String,
        arguments: Option<String>,
    },
    Where {
        keyword: WhereKeyword,
        condition: String,
    },
    Node {
        variable: Option<String>,
        labels: String,
        properties: String,
    },
    Edge {
        variable: Option<String>,
        types: String,
        properties: String,
        direction: EdgeDirection,
    },
    Unwind {
        list_expression: String,
        variable: String,
    },
    With(Projections),
    Union {
        include_duplicates: bool,
    },
    Delete {
        expressions: Vec<String>,
        detach: bool,
    },
    Remove(Vec<String>),
    Yield(Projections),
    Return(Projections),
    OrderBy(String),
    Limit(String),
    Skip(String),
    Custom(String),
}

impl Clause {
    pub fn kind(&self) -> ClauseKind {
        match self {
            Self::LoadCsv { .. } => ClauseKind::LoadCsv,
            Self::Match { .. } => ClauseKind::Match,
            Self::Merge => ClauseKind::Merge,
            Self::Create => ClauseKind::Create,
            Self::Call { .. } => ClauseKind::Call,
            Self::Where { keyword, .. } => keyword.kind(),
            Self::Node { .. } => ClauseKind::Node,
            Self::Edge { .. } => ClauseKind::Edge,
            Self::Unwind { .. } => ClauseKind::Unwind,
            Self::With(_) => ClauseKind::With,
            Self::Union { .. } => ClauseKind::Union,
            Self::Delete { .. } => ClauseKind::Delete,
            Self::Remove(_) => ClauseKind::Remove,
            Self::Yield(_) => ClauseKind::Yield,
            Self::Return(_) => ClauseKind::Return,
            Self::OrderBy(_) => ClauseKind::OrderBy,
            Self::Limit(_) => ClauseKind::Limit,
            Self::Skip(_) => ClauseKind::Skip,
            Self::Custom(_) => ClauseKind::Custom,
        }
    }

    /// Pattern variable, if this is a node or edge clause with one.
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::Node { variable, .. } | Self::Edge { variable, .. } => variable.as_deref(),
            _ => None,
        }
    }

    /// Renders this clause as a Cypher fragment.
    pub fn render(&self) -> String {
        match self {
            Self::LoadCsv { path, header, row } => format!(
                " LOAD CSV FROM {} {} HEADER AS {row} ",
                quote_string(path),
                if *header { "WITH" } else { "NO" }
            ),
            Self::Match { optional: true } => " OPTIONAL MATCH ".to_string(),
            Self::Match { optional: false } => " MATCH ".to_string(),
            Self::Merge => " MERGE ".to_string(),
            Self::Create => " CREATE ".to_string(),
            Self::Call {
                procedure,
                arguments,
            } => format!(" CALL {procedure}({}) ", arguments.as_deref().unwrap_or("")),
            Self::Where { keyword, condition } => format!(" {} {condition} ", keyword.as_str()),
            Self::Node {
                variable,
                labels,
                properties,
            } => {
                let variable = variable.as_deref().unwrap_or("");
                if properties.is_empty() {
                    format!("({variable}{labels})")
                } else {
                    format!("({variable}{labels} {properties})")
                }
            }
            Self::Edge {
                variable,
                types,
                properties,
                direction,
            } => {
                let body = format!("{}{types}{properties}", variable.as_deref().unwrap_or(""));
                match direction {
                    EdgeDirection::Outgoing => format!("-[{body}]->"),
                    EdgeDirection::Incoming => format!("<-[{body}]-"),
                    EdgeDirection::Undirected => format!("-[{body}]-"),
                }
            }
            Self::Unwind {
                list_expression,
                variable,
            } => format!(" UNWIND {list_expression} AS {variable} "),
            Self::With(projections) => format!(" WITH {} ", projection_list(projections)),
            Self::Union { include_duplicates } => {
                if *include_duplicates {
                    " UNION ALL ".to_string()
                } else {
                    " UNION ".to_string()
                }
            }
            Self::Delete {
                expressions,
                detach,
            } => format!(
                " {} DELETE {} ",
                if *detach { "DETACH" } else { "" },
                expressions.join(", ")
            ),
            Self::Remove(items) => format!(" REMOVE {} ", items.join(", ")),
            Self::Yield(projections) => format!(" YIELD {} ", projection_list(projections)),
            Self::Return(projections) => format!(" RETURN {} ", projection_list(projections)),
            Self::OrderBy(properties) => format!(" ORDER BY {properties} "),
            Self::Limit(expression) => format!(" LIMIT {expression} "),
            Self::Skip(expression) => format!(" SKIP {expression} "),
            Self::Custom(text) => text.clone(),
        }
    }
}

/// Renders projections as `a AS b, c`, or `*` when empty.
///
/// An alias is dropped when blank or identical to its expression.
pub fn projection_list(projections: &[(String, String)]) -> String {
    if projections.is_empty() {
        return "*".to_string();
    }
    projections
        .iter()
        .map(|(expression, alias)| {
            if alias.is_empty() || alias == expression {
                expression.clone()
            } else {
                format!("{expression} AS {alias}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
