//! Lazy relationship resolution.
//!
//! A relationship is never computed at merge time or cached on a record:
//! every traversal is a fresh read of repository state, so associations
//! always reflect the latest merged data. The cost is an O(n) table scan
//! per has-many/has-one call, which is acceptable for an in-memory cache.

use crate::error::{StoreError, StoreResult};
use crate::query::Conditions;
use crate::repository::{Queryable, Repository};
use recall_model::{naming, Record, Relationship, RelationshipKind, SharedRecord};

/// The result of traversing a relationship.
#[derive(Debug, Clone)]
pub enum Related {
    /// A has-many or has-many-through result, in resolution order.
    Many(Vec<SharedRecord>),
    /// A has-one or belongs-to result.
    One(Option<SharedRecord>),
}

impl Related {
    /// Flattens either variant into a list of records.
    #[must_use]
    pub fn records(self) -> Vec<SharedRecord> {
        match self {
            Related::Many(records) => records,
            Related::One(record) => record.into_iter().collect(),
        }
    }

    /// The first (or only) related record.
    #[must_use]
    pub fn first(self) -> Option<SharedRecord> {
        match self {
            Related::Many(records) => records.into_iter().next(),
            Related::One(record) => record,
        }
    }
}

impl Repository {
    /// Resolves a declared relationship of a record against current
    /// repository state.
    ///
    /// Fails with [`StoreError::UnresolvedAssociation`] when the record's
    /// type declares no such relationship or when the target type (after
    /// inference or override) has not been registered yet.
    pub fn relation(&self, record: &Record, name: &str) -> StoreResult<Related> {
        let schema = self.schema(&record.type_name)?;
        let declaration = schema
            .relationship(name)
            .ok_or_else(|| StoreError::UnresolvedAssociation {
                name: name.to_owned(),
                reason: format!(
                    "record type '{}' declares no such association",
                    record.type_name
                ),
            })?
            .clone();

        match declaration.kind {
            RelationshipKind::HasMany => {
                let target = self.target_of(&declaration)?;
                let conditions = self.foreign_key_conditions(record, &declaration);
                Ok(Related::Many(self.select(
                    &target,
                    &conditions,
                    declaration.order_by.as_deref(),
                )))
            }
            RelationshipKind::HasOne => {
                let target = self.target_of(&declaration)?;
                let conditions = self.foreign_key_conditions(record, &declaration);
                Ok(Related::One(self.find_by(&target, &conditions)))
            }
            RelationshipKind::BelongsTo => {
                let target = self.target_of(&declaration)?;
                let foreign_key = declaration
                    .foreign_key
                    .clone()
                    .unwrap_or_else(|| format!("{}_id", declaration.name));
                Ok(Related::One(
                    record
                        .identity_at(&foreign_key)
                        .and_then(|id| self.find(&target, &id)),
                ))
            }
            RelationshipKind::HasManyThrough => self.resolve_through(record, &declaration),
        }
    }

    /// Convenience wrapper resolving a relationship to a list.
    pub fn related_all(&self, record: &Record, name: &str) -> StoreResult<Vec<SharedRecord>> {
        Ok(self.relation(record, name)?.records())
    }

    /// Convenience wrapper resolving a relationship to at most one record.
    pub fn related_one(&self, record: &Record, name: &str) -> StoreResult<Option<SharedRecord>> {
        Ok(self.relation(record, name)?.first())
    }

    /// Maps each record of the intermediate relationship through its
    /// source relationship, in order, without deduplication. Absent
    /// singular results are skipped; plural results are flattened.
    fn resolve_through(&self, record: &Record, declaration: &Relationship) -> StoreResult<Related> {
        let through = declaration.through.as_deref().unwrap_or_default();
        let intermediates = self.relation(record, through)?.records();
        let source = declaration
            .source
            .clone()
            .unwrap_or_else(|| naming::singularize(&declaration.name));

        let mut resolved = Vec::with_capacity(intermediates.len());
        for intermediate in intermediates {
            match self.relation(&intermediate, &source)? {
                Related::One(Some(record)) => resolved.push(record),
                Related::One(None) => {}
                Related::Many(mut records) => resolved.append(&mut records),
            }
        }
        Ok(Related::Many(resolved))
    }

    /// The target type of a declaration, validated against the registry.
    fn target_of(&self, declaration: &Relationship) -> StoreResult<String> {
        let target = declaration.target_type();
        if !self.is_registered(&target) {
            return Err(StoreError::UnresolvedAssociation {
                name: declaration.name.clone(),
                reason: format!("no record type '{target}' is registered"),
            });
        }
        Ok(target)
    }

    /// Conditions matching records whose foreign key points at `record`.
    /// The key defaults to the underscored owner type plus `_id`.
    fn foreign_key_conditions(&self, record: &Record, declaration: &Relationship) -> Conditions {
        let foreign_key = declaration
            .foreign_key
            .clone()
            .unwrap_or_else(|| naming::foreign_key_for(&record.type_name));
        Conditions::new().field(foreign_key, record.id.as_str())
    }
}
