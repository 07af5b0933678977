//! The merge engine.
//!
//! Ingestion is two-phase: insert every new record from the dataset,
//! then fire `create` once per inserted record in dataset order. The
//! phase split is the central correctness property — a handler observing
//! one record of a batch can already see every other record of the same
//! batch, including records of a different type.

use crate::error::{StoreError, StoreResult};
use crate::repository::{Repository, CREATE_EVENT};
use recall_model::{Record, SharedRecord};
use recall_types::{AttrMap, Dataset, Identity};
use std::sync::Arc;
use tracing::{debug, info};

impl Repository {
    /// Merges a nested dataset into the repository, insert-only.
    ///
    /// Types are processed in dataset order; an unregistered type name
    /// fails the merge with [`StoreError::UnregisteredType`] immediately.
    /// Records of types processed earlier remain inserted but receive no
    /// `create` notification — the merge is fail-fast per type, not
    /// atomic across types.
    ///
    /// Identities already present are skipped without touching the
    /// existing record's attributes. Returns the newly inserted records
    /// in notification order.
    pub fn merge(&mut self, dataset: Dataset) -> StoreResult<Vec<SharedRecord>> {
        let mut created: Vec<SharedRecord> = Vec::new();

        for (type_name, rows) in dataset {
            if !self.is_registered(&type_name) {
                return Err(StoreError::UnregisteredType(type_name));
            }
            for (id, attributes) in rows {
                if self.contains(&type_name, &id) {
                    continue;
                }
                let record = self.insert(&type_name, id, attributes);
                created.push(record);
            }
        }

        for record in &created {
            self.trigger(&record.type_name, CREATE_EVENT, record);
        }

        info!(inserted = created.len(), "merged dataset");
        Ok(created)
    }

    /// Inserts a single record built from a create response's payload.
    ///
    /// The payload is trusted to be new, so no identity-presence check is
    /// performed; the identity is read from the payload's `id` attribute.
    /// Fires `create` for exactly this record.
    pub fn insert_created(
        &mut self,
        type_name: &str,
        attributes: AttrMap,
    ) -> StoreResult<SharedRecord> {
        self.schema(type_name)?;
        let id = attributes
            .get("id")
            .and_then(Identity::from_value)
            .ok_or_else(|| StoreError::MissingIdentity(type_name.to_owned()))?;

        let record = self.insert(type_name, id, attributes);
        self.trigger(type_name, CREATE_EVENT, &record);
        Ok(record)
    }

    fn contains(&self, type_name: &str, id: &Identity) -> bool {
        self.table(type_name).is_some_and(|t| t.contains_key(id))
    }

    fn insert(&mut self, type_name: &str, id: Identity, attributes: AttrMap) -> SharedRecord {
        let record = Arc::new(Record::new(type_name, id.clone(), attributes));
        debug!(type_name, id = %record.id, "inserted record");
        self.tables
            .entry(type_name.to_owned())
            .or_default()
            .insert(id, record.clone());
        record
    }
}
