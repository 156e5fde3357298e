//! Attribute filtering for list data sources.
//!
//! A filter is a list of clauses. A record is kept when **every** clause
//! matches, and a clause matches when the record's stringified attribute
//! equals **any** of the clause's values. No clauses keeps everything.
//! A clause on an attribute the record does not expose, or whose value has
//! no string form, excludes the record.
//!
//! # Example
//!
//! ```
//! use coolify_provider::filter::{apply, FilterClause};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"name": "api", "is_git_related": true}),
//!     json!({"name": "worker", "is_git_related": false}),
//! ];
//! let clauses = vec![FilterClause::new("is_git_related", ["true"])];
//!
//! let kept = apply(records, &clauses);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0]["name"], "api");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;
use crate::schema::{Attribute, AttributeType, Block, NestedBlock};
use crate::value::{is_unknown_json, Attr};

/// One `{name, values}` filter clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Attribute name to match on.
    pub name: String,
    /// Accepted values; any match satisfies the clause.
    #[serde(default)]
    pub values: Vec<String>,
}

impl FilterClause {
    /// Create a clause.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// An attribute value as seen by the filter engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// A string attribute.
    String(String),
    /// A boolean attribute.
    Bool(bool),
    /// An integer attribute.
    Int(i64),
    /// A floating-point attribute.
    Float(f64),
    /// Any other type (lists, objects, ...). Never matches.
    Unsupported,
}

impl FilterValue {
    /// The string form compared against clause values, `None` if unsupported.
    pub fn stringify(&self) -> Option<String> {
        match self {
            FilterValue::String(s) => Some(s.clone()),
            FilterValue::Bool(b) => Some(b.to_string()),
            FilterValue::Int(i) => Some(i.to_string()),
            FilterValue::Float(f) => Some(f.to_string()),
            FilterValue::Unsupported => None,
        }
    }
}

impl From<&Attr<String>> for FilterValue {
    fn from(v: &Attr<String>) -> Self {
        FilterValue::String(v.required_scalar())
    }
}

impl From<&Attr<bool>> for FilterValue {
    fn from(v: &Attr<bool>) -> Self {
        FilterValue::Bool(v.required_scalar())
    }
}

impl From<&Attr<i64>> for FilterValue {
    fn from(v: &Attr<i64>) -> Self {
        FilterValue::Int(v.required_scalar())
    }
}

impl From<&Value> for FilterValue {
    fn from(v: &Value) -> Self {
        match v {
            // null and unknown read as the zero value of a string
            Value::Null => FilterValue::String(String::new()),
            Value::String(_) if is_unknown_json(v) => FilterValue::String(String::new()),
            Value::String(s) => FilterValue::String(s.clone()),
            Value::Bool(b) => FilterValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FilterValue::Int(i),
                None => n.as_f64().map_or(FilterValue::Unsupported, FilterValue::Float),
            },
            _ => FilterValue::Unsupported,
        }
    }
}

/// A record exposing a name → value attribute lookup.
pub trait Filterable {
    /// Look up an attribute by name; `None` if the record has no such attribute.
    fn filter_attribute(&self, name: &str) -> Option<FilterValue>;
}

impl Filterable for Value {
    fn filter_attribute(&self, name: &str) -> Option<FilterValue> {
        self.as_object()?.get(name).map(FilterValue::from)
    }
}

impl Filterable for serde_json::Map<String, Value> {
    fn filter_attribute(&self, name: &str) -> Option<FilterValue> {
        self.get(name).map(FilterValue::from)
    }
}

/// Whether a single record passes every clause.
pub fn matches<R: Filterable + ?Sized>(record: &R, clauses: &[FilterClause]) -> bool {
    clauses.iter().all(|clause| {
        record
            .filter_attribute(&clause.name)
            .and_then(|value| value.stringify())
            .is_some_and(|s| clause.values.iter().any(|v| *v == s))
    })
}

/// Keep the records that pass every clause, preserving order.
pub fn apply<R: Filterable>(records: Vec<R>, clauses: &[FilterClause]) -> Vec<R> {
    if clauses.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches(record, clauses))
        .collect()
}

/// Parse the `filter` block of a data source config and check clause names.
pub fn parse_clauses(
    config: &Value,
    allowed: &[&str],
) -> Result<Vec<FilterClause>, ProviderError> {
    let clauses: Vec<FilterClause> = match config.get("filter") {
        None | Some(Value::Null) => Vec::new(),
        Some(raw) => serde_json::from_value(raw.clone())?,
    };

    for (i, clause) in clauses.iter().enumerate() {
        if !allowed.contains(&clause.name.as_str()) {
            return Err(ProviderError::validation(
                format!("filter.{}.name", i),
                "Invalid filter name",
                format!(
                    "Filter name '{}' is not supported. Valid names are `{}`",
                    clause.name,
                    allowed.join("`, `")
                ),
            ));
        }
    }

    Ok(clauses)
}

/// The `filter` list block shared by every list data source.
pub fn filter_block(allowed: &[&str]) -> NestedBlock {
    NestedBlock::list(
        Block::new()
            .with_description("Filter results by values")
            .with_attribute(
                "name",
                Attribute::required_string().with_description(format!(
                    "Name of the field to filter on. Valid names are `{}`",
                    allowed.join("`, `")
                )),
            )
            .with_attribute(
                "values",
                Attribute::new(
                    AttributeType::list(AttributeType::String),
                    crate::schema::AttributeFlags::required(),
                )
                .with_description(
                    "List of values to match against; if any value matches, the filter is satisfied",
                ),
            ),
    )
}
