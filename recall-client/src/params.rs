//! Request parameter encoding.
//!
//! A create payload is flattened into key/value parameters namespaced by
//! the underscored type name: type `Example` with `{a: 1, b: 2}` encodes
//! as `example[a]=1, example[b]=2`.

use recall_model::naming;
use recall_types::AttrMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat request parameters, ordered by key.
pub type ParamMap = BTreeMap<String, String>;

/// Encodes an attribute bag into namespaced request parameters.
#[must_use]
pub fn to_resource_params(type_name: &str, attributes: &AttrMap) -> ParamMap {
    let namespace = naming::underscore(type_name);
    attributes
        .iter()
        .map(|(attribute, value)| (format!("{namespace}[{attribute}]"), render(value)))
        .collect()
}

/// String values encode bare; every other scalar uses its JSON rendering.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
