use recall_types::{AttrMap, Identity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A shared handle to an identity-mapped record.
///
/// The repository hands out `Arc`s to the single instance it holds, so
/// "same logical record" is observable as pointer equality.
pub type SharedRecord = Arc<Record>;

/// One instance of a record type: a bag of scalar attributes plus the
/// identity it is mapped under.
///
/// Relationships are not stored on the record; they are resolved lazily
/// against repository state by `recall-store`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Identity,
    pub type_name: String,
    pub attributes: AttrMap,
}

impl Record {
    /// Builds a record, forcing the `id` attribute to the canonical form
    /// of the identity so key and attribute can never disagree.
    #[must_use]
    pub fn new(type_name: impl Into<String>, id: Identity, mut attributes: AttrMap) -> Self {
        attributes.insert("id".to_owned(), Value::String(id.as_str().to_owned()));
        Self {
            id,
            type_name: type_name.into(),
            attributes,
        }
    }

    /// Returns an attribute value by name.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Returns a string attribute.
    #[must_use]
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(Value::as_str)
    }

    /// Returns a numeric attribute.
    #[must_use]
    pub fn get_f64(&self, attribute: &str) -> Option<f64> {
        self.get(attribute).and_then(Value::as_f64)
    }

    /// Returns a boolean attribute.
    #[must_use]
    pub fn get_bool(&self, attribute: &str) -> Option<bool> {
        self.get(attribute).and_then(Value::as_bool)
    }

    /// Reads an attribute as a canonicalized identity.
    ///
    /// This is how foreign keys are read: `record.identity_at("car_id")`
    /// yields the same key whether the server sent `1` or `"1"`.
    #[must_use]
    pub fn identity_at(&self, attribute: &str) -> Option<Identity> {
        self.get(attribute).and_then(Identity::from_value)
    }
}
