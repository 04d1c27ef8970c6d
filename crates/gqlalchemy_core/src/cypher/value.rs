//! Typed Cypher values and their literal rendering.
//!
//! # Responsibility
//! - Model every value that can appear in a property map, a `WHERE`
//!   condition or a fetched record.
//! - Render values as Cypher literals that Memgraph parses back verbatim.
//!
//! # Invariants
//! - `Float` always renders with a decimal point or exponent so the server
//!   never narrows it to an integer.
//! - `String` renders single-quoted with `\` and `'` escaped.
//! - `Variable` renders verbatim and is the only way to inject raw Cypher.
//! - Serializing a non-finite `Float` fails instead of emitting JSON `null`.

use crate::model::{Node, Relationship};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Value that can be rendered into, or fetched from, a Cypher query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Must be finite to serialize; non-finite values only render as Cypher.
    Float(#[serde(serialize_with = "serialize_finite")] f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Raw Cypher expression, e.g. `m.age` or `$limit`.
    Variable(String),
    Date(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    Duration(#[serde(with = "duration_micros")] TimeDelta),
    Node(Box<Node>),
    Relationship(Box<Relationship>),
}

impl Value {
    /// Wraps a raw Cypher expression that must not be quoted.
    pub fn variable(expression: impl Into<String>) -> Self {
        Self::Variable(expression.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Renders this value as Cypher literal text.
    pub fn to_cypher(&self) -> String {
        to_cypher_value(self)
    }
}

/// Renders one value as Cypher literal text.
pub fn to_cypher_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Int(number) => number.to_string(),
        Value::Float(number) => float_literal(*number),
        Value::String(text) => quote_string(text),
        Value::List(items) => {
            let rendered = items.iter().map(to_cypher_value).collect::<Vec<_>>();
            format!("[{}]", rendered.join(", "))
        }
        Value::Map(entries) => map_literal(entries),
        Value::Variable(expression) => expression.clone(),
        Value::Date(date) => format!("date('{}')", date.format("%Y-%m-%d")),
        Value::LocalTime(time) => format!("localTime('{}')", time_text(time)),
        Value::LocalDateTime(datetime) => format!(
            "localDateTime('{}T{}')",
            datetime.date().format("%Y-%m-%d"),
            time_text(&datetime.time())
        ),
        Value::Duration(duration) => format!("duration('{}')", duration_text(*duration)),
        Value::Node(node) => map_literal(&node.properties),
        Value::Relationship(relationship) => map_literal(&relationship.properties),
    }
}

/// Quotes and escapes text as a single-quoted Cypher string literal.
pub(crate) fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

pub(crate) fn map_literal(entries: &BTreeMap<String, Value>) -> String {
    let rendered = entries
        .iter()
        .map(|(key, value)| format!("{key}: {}", to_cypher_value(value)))
        .collect::<Vec<_>>();
    format!("{{{}}}", rendered.join(", "))
}

fn float_literal(number: f64) -> String {
    if number.is_nan() {
        return "0.0/0.0".to_string();
    }
    if number.is_infinite() {
        return if number > 0.0 { "1.0/0.0" } else { "-1.0/0.0" }.to_string();
    }
    // Debug keeps the trailing `.0` that Display drops.
    format!("{number:?}")
}

fn time_text(time: &NaiveTime) -> String {
    if time.nanosecond() == 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%H:%M:%S%.6f").to_string()
    }
}

fn duration_text(duration: TimeDelta) -> String {
    let negative = duration < TimeDelta::zero();
    let magnitude = if negative { -duration } else { duration };

    let total_seconds = magnitude.num_seconds();
    let micros = magnitude.subsec_nanos() / 1_000;
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let sign = if negative { "-" } else { "" };
    if micros == 0 {
        format!("{sign}P{days}DT{hours}H{minutes}M{seconds}S")
    } else {
        format!("{sign}P{days}DT{hours}H{minutes}M{seconds}.{micros:06}S")
    }
}

fn serialize_finite<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(serde::ser::Error::custom(format!(
            "non-finite float `{value}` has no serialized form"
        )))
    }
}

mod duration_micros {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        match value.num_microseconds() {
            Some(micros) => micros.serialize(serializer),
            None => Err(serde::ser::Error::custom(
                "duration does not fit into i64 microseconds",
            )),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let micros = i64::deserialize(deserializer)?;
        Ok(TimeDelta::microseconds(micros))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Self::LocalTime(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::LocalDateTime(value)
    }
}

impl From<TimeDelta> for Value {
    fn from(value: TimeDelta) -> Self {
        Self::Duration(value)
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Self::Node(Box::new(value))
    }
}

impl From<Relationship> for Value {
    fn from(value: Relationship) -> Self {
        Self::Relationship(Box::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        Self::Map(
            value
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(value: HashMap<K, V>) -> Self {
        Self::Map(
            value
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
