//! Merge datasets.
//!
//! A fetch response is a nested mapping of type name → identity →
//! attribute bag. Iteration order is document order: the merge engine
//! relies on it when deciding the order `create` notifications fire in.

use crate::Identity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An attribute bag: attribute name → scalar JSON value.
pub type AttrMap = serde_json::Map<String, Value>;

/// The rows of one record type within a dataset, in document order.
pub type DatasetRows = IndexMap<Identity, AttrMap>;

/// A nested dataset as handed to the merge engine.
///
/// Deserializes directly from a fetch response body:
///
/// ```json
/// { "Car": { "1": { "maker": "Toyota" } }, "Passenger": { "7": { "name": "Gavin" } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(IndexMap<String, DatasetRows>);

impl Dataset {
    /// Creates an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record's attributes under a type name and identity.
    ///
    /// Later inserts for the same identity replace the attribute bag but
    /// keep its original position.
    pub fn insert(
        &mut self,
        type_name: impl Into<String>,
        id: impl Into<Identity>,
        attributes: AttrMap,
    ) {
        self.0
            .entry(type_name.into())
            .or_default()
            .insert(id.into(), attributes);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(
        mut self,
        type_name: impl Into<String>,
        id: impl Into<Identity>,
        attributes: AttrMap,
    ) -> Self {
        self.insert(type_name, id, attributes);
        self
    }

    /// Iterates type names and their rows in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DatasetRows)> {
        self.0.iter()
    }

    /// The type names present, in document order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of record types in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the dataset holds no types at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Dataset {
    type Item = (String, DatasetRows);
    type IntoIter = indexmap::map::IntoIter<String, DatasetRows>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
