//! The process-wide record repository.
//!
//! One `Repository` owns the registry of record types and one
//! insertion-ordered table per type, mapping identity → the single
//! shared instance of that record. All reads and writes are synchronous;
//! callers that want cross-thread access wrap the repository in their own
//! lock, which also preserves the insert-all-then-notify-all ordering of
//! the merge engine.

use crate::error::{StoreError, StoreResult};
use crate::query::{self, Conditions};
use crate::registry::{Handler, Registry};
use indexmap::IndexMap;
use recall_model::{RecordType, SharedRecord};
use recall_types::Identity;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// The event fired once per record inserted by a merge or create.
pub const CREATE_EVENT: &str = "create";

/// One type's identity map, in insertion order.
pub(crate) type Table = IndexMap<Identity, SharedRecord>;

/// Read-only capability over repository state.
///
/// The view layer and the relationship resolver consume records through
/// this surface; nothing behind it can mutate a table.
pub trait Queryable {
    /// The single instance mapped at an identity, if present.
    fn find(&self, type_name: &str, id: &Identity) -> Option<SharedRecord>;

    /// First record matching the conditions, in table-iteration order.
    fn find_by(&self, type_name: &str, conditions: &Conditions) -> Option<SharedRecord>;

    /// Every record of a type, in insertion order.
    fn all(&self, type_name: &str) -> Vec<SharedRecord>;

    /// Records matching the conditions, optionally sorted ascending by an
    /// attribute (stable, case-sensitive).
    fn select(
        &self,
        type_name: &str,
        conditions: &Conditions,
        order_by: Option<&str>,
    ) -> Vec<SharedRecord>;
}

/// Identity-mapped storage for every registered record type.
#[derive(Default)]
pub struct Repository {
    pub(crate) registry: Registry,
    pub(crate) tables: HashMap<String, Table>,
}

impl Repository {
    /// Creates an empty repository with no registered types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ─────────────────────────────────────────────

    /// Registers a record type.
    ///
    /// Re-registering a name overwrites the prior schema, drops its bound
    /// handlers, and clears its table. No dedup is performed; calling code
    /// registers each type once at startup.
    pub fn register(&mut self, schema: RecordType) -> StoreResult<()> {
        if schema.name.is_empty() {
            return Err(StoreError::Configuration(
                "record type has no name".to_owned(),
            ));
        }
        self.tables.insert(schema.name.clone(), Table::new());
        self.registry.insert(schema);
        Ok(())
    }

    /// Whether a type name has been registered.
    #[must_use]
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.registry.contains(type_name)
    }

    /// The schema registered under a type name.
    pub fn schema(&self, type_name: &str) -> StoreResult<&RecordType> {
        self.registry
            .schema(type_name)
            .ok_or_else(|| StoreError::UnregisteredType(type_name.to_owned()))
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Number of records currently held for a type.
    #[must_use]
    pub fn count(&self, type_name: &str) -> usize {
        self.tables.get(type_name).map_or(0, IndexMap::len)
    }

    /// Clears every table without unregistering types, declarations, or
    /// bound handlers. Used for test isolation.
    pub fn reset_all(&mut self) {
        for table in self.tables.values_mut() {
            table.clear();
        }
    }

    // ── Events ───────────────────────────────────────────────────

    /// Binds a handler to an event on a record type. Handlers run
    /// synchronously, in registration order, each receiving the same
    /// arguments.
    pub fn bind<F>(&mut self, type_name: &str, event: &str, handler: F) -> StoreResult<()>
    where
        F: Fn(&Repository, &SharedRecord) + Send + Sync + 'static,
    {
        if !self.registry.bind(type_name, event, Arc::new(handler)) {
            return Err(StoreError::UnregisteredType(type_name.to_owned()));
        }
        Ok(())
    }

    /// Binds a handler to the `create` event.
    pub fn on_create<F>(&mut self, type_name: &str, handler: F) -> StoreResult<()>
    where
        F: Fn(&Repository, &SharedRecord) + Send + Sync + 'static,
    {
        self.bind(type_name, CREATE_EVENT, handler)
    }

    /// Alias for [`on_create`](Self::on_create), kept for callers porting
    /// from after-create style hooks.
    pub fn after_create<F>(&mut self, type_name: &str, handler: F) -> StoreResult<()>
    where
        F: Fn(&Repository, &SharedRecord) + Send + Sync + 'static,
    {
        self.on_create(type_name, handler)
    }

    /// Fires an event on a record type, invoking every bound handler in
    /// registration order.
    ///
    /// A panicking handler is caught and logged; its siblings still run.
    /// Triggering an event on an unregistered type is a no-op.
    pub fn trigger(&self, type_name: &str, event: &str, record: &SharedRecord) {
        let handlers: Vec<Handler> = self.registry.handlers(type_name, event);
        for handler in handlers {
            let outcome = catch_unwind(AssertUnwindSafe(|| handler(self, record)));
            if outcome.is_err() {
                warn!(
                    type_name,
                    event, "event handler panicked; continuing with remaining handlers"
                );
            }
        }
    }

    // ── Internals shared with merge/resolver ─────────────────────

    pub(crate) fn table(&self, type_name: &str) -> Option<&Table> {
        self.tables.get(type_name)
    }
}

impl Queryable for Repository {
    fn find(&self, type_name: &str, id: &Identity) -> Option<SharedRecord> {
        self.tables.get(type_name)?.get(id).cloned()
    }

    fn find_by(&self, type_name: &str, conditions: &Conditions) -> Option<SharedRecord> {
        self.tables
            .get(type_name)?
            .values()
            .find(|record| conditions.matches(record))
            .cloned()
    }

    fn all(&self, type_name: &str) -> Vec<SharedRecord> {
        self.tables
            .get(type_name)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default()
    }

    fn select(
        &self,
        type_name: &str,
        conditions: &Conditions,
        order_by: Option<&str>,
    ) -> Vec<SharedRecord> {
        let mut found: Vec<SharedRecord> = self
            .tables
            .get(type_name)
            .map(|table| {
                table
                    .values()
                    .filter(|record| conditions.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(attribute) = order_by {
            query::sort_records(&mut found, attribute);
        }
        found
    }
}
