//! Record type registry: schemas plus their bound event handlers.

use crate::repository::Repository;
use indexmap::IndexMap;
use recall_model::{RecordType, SharedRecord};
use std::collections::HashMap;
use std::sync::Arc;

/// A bound event handler. Handlers get the repository read-only, so a
/// handler can query any table merged in the same batch but can never
/// start a nested merge.
pub type Handler = Arc<dyn Fn(&Repository, &SharedRecord) + Send + Sync>;

pub(crate) struct Entry {
    pub(crate) schema: RecordType,
    /// Event name → handlers in registration order.
    pub(crate) handlers: HashMap<String, Vec<Handler>>,
}

/// Maps type names to their schema and handler table.
///
/// Registration is overwrite-on-conflict: re-registering a name replaces
/// the prior schema and drops its handlers. Callers are responsible for
/// registering each type once.
#[derive(Default)]
pub(crate) struct Registry {
    entries: IndexMap<String, Entry>,
}

impl Registry {
    pub(crate) fn insert(&mut self, schema: RecordType) {
        self.entries.insert(
            schema.name.clone(),
            Entry {
                schema,
                handlers: HashMap::new(),
            },
        );
    }

    pub(crate) fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    pub(crate) fn schema(&self, type_name: &str) -> Option<&RecordType> {
        self.entries.get(type_name).map(|e| &e.schema)
    }

    pub(crate) fn bind(&mut self, type_name: &str, event: &str, handler: Handler) -> bool {
        match self.entries.get_mut(type_name) {
            Some(entry) => {
                entry
                    .handlers
                    .entry(event.to_owned())
                    .or_default()
                    .push(handler);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the handlers bound for an event, so the dispatcher can
    /// run them while the registry itself is borrowed elsewhere.
    pub(crate) fn handlers(&self, type_name: &str, event: &str) -> Vec<Handler> {
        self.entries
            .get(type_name)
            .and_then(|e| e.handlers.get(event))
            .cloned()
            .unwrap_or_default()
    }
}
