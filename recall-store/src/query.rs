//! Conditions-based querying.
//!
//! Queries are full scans over a per-type table; the repository is an
//! in-memory cache, not an indexed store. Equality is loose across the
//! number/string boundary because identities canonicalize to strings
//! while foreign-key attributes often arrive as JSON numbers.

use recall_model::{Record, SharedRecord};
use serde_json::Value;
use std::cmp::Ordering;

/// A conjunction of attribute/value equalities.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    fields: Vec<(String, Value)>,
}

impl Conditions {
    /// Creates an empty condition set, which every record matches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one attribute equality.
    #[must_use]
    pub fn field(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((attribute.into(), value.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether every condition is loosely equal to the record's attribute.
    /// A missing attribute never matches.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.fields.iter().all(|(attribute, expected)| {
            record
                .get(attribute)
                .is_some_and(|actual| loose_eq(actual, expected))
        })
    }
}

/// Scalar equality across the number/string boundary: numbers compare
/// numerically, strings literally, and a numeric string equals the number
/// it parses to. Everything else falls back to strict equality.
pub(crate) fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            s.parse::<f64>().ok() == n.as_f64()
        }
        _ => a == b,
    }
}

/// Case-sensitive ascending comparison for `order_by` sorting.
///
/// Records missing the attribute compare equal, so a stable sort keeps
/// them in table-iteration order.
pub(crate) fn compare_by(a: &Record, b: &Record, attribute: &str) -> Ordering {
    match (a.get(attribute), b.get(attribute)) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Some(x), Some(y)) => render(x).cmp(&render(y)),
        _ => Ordering::Equal,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Stable ascending sort by an attribute.
pub(crate) fn sort_records(records: &mut [SharedRecord], attribute: &str) {
    records.sort_by(|a, b| compare_by(a, b, attribute));
}
