use crate::naming;
use recall_types::Identity;
use serde::{Deserialize, Serialize};

/// A registered record type: its name, the base resource locator the
/// transport uses for it, and its relationship declarations.
///
/// Declarations never validate that the target type exists — registration
/// order is caller-determined, so forward references must be legal.
/// Existence is checked lazily at first traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordType {
    pub name: String,
    /// Opaque base resource locator, e.g. `/cars`. Interpreted only by
    /// the transport adapter.
    pub locator: String,
    pub relationships: Vec<Relationship>,
}

impl RecordType {
    /// Creates a schema with no relationship declarations.
    #[must_use]
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
            relationships: Vec::new(),
        }
    }

    /// Declares a has-many association.
    #[must_use]
    pub fn has_many(self, name: &str, options: RelationshipOptions) -> Self {
        self.declare(RelationshipKind::HasMany, name, None, options)
    }

    /// Declares a has-many association reached through another one.
    #[must_use]
    pub fn has_many_through(self, name: &str, through: &str, options: RelationshipOptions) -> Self {
        self.declare(RelationshipKind::HasManyThrough, name, Some(through), options)
    }

    /// Declares a has-one association.
    #[must_use]
    pub fn has_one(self, name: &str, options: RelationshipOptions) -> Self {
        self.declare(RelationshipKind::HasOne, name, None, options)
    }

    /// Declares a belongs-to association.
    #[must_use]
    pub fn belongs_to(self, name: &str, options: RelationshipOptions) -> Self {
        self.declare(RelationshipKind::BelongsTo, name, None, options)
    }

    fn declare(
        mut self,
        kind: RelationshipKind,
        name: &str,
        through: Option<&str>,
        options: RelationshipOptions,
    ) -> Self {
        self.relationships.push(Relationship {
            kind,
            name: name.to_owned(),
            through: through.map(str::to_owned),
            record_type: options.record_type,
            foreign_key: options.foreign_key,
            order_by: options.order_by,
            source: options.source,
        });
        self
    }

    /// Looks up a declared relationship by name.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// The locator of one record of this type: the base locator extended
    /// with the record's identity (`/cars` + `1` → `/cars/1`).
    #[must_use]
    pub fn record_locator(&self, id: &Identity) -> String {
        format!("{}/{}", self.locator, id)
    }

    /// The conventional foreign-key attribute other types use to point at
    /// records of this type.
    #[must_use]
    pub fn foreign_key(&self) -> String {
        naming::foreign_key_for(&self.name)
    }
}

/// The four association kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    HasMany,
    HasManyThrough,
    HasOne,
    BelongsTo,
}

/// Declarative metadata for one association.
///
/// Kind-specific options are kept as flat optional fields rather than
/// nested per-kind payloads so the serialized form stays a single flat
/// object. `through` is only meaningful for `HasManyThrough`, `order_by`
/// for `HasMany`, `foreign_key` for `BelongsTo`, `source` for
/// `HasManyThrough`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub name: String,
    /// Explicit target type name, overriding inference from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// Explicit foreign-key attribute, overriding `<name>_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    /// Attribute to sort a has-many result by, ascending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Name of the intermediate has-many for a through association.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
    /// Relationship to follow on each intermediate record, overriding the
    /// singular of `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Relationship {
    /// The target type name: the explicit override if given, otherwise
    /// inferred from the relationship name.
    #[must_use]
    pub fn target_type(&self) -> String {
        if let Some(explicit) = &self.record_type {
            return explicit.clone();
        }
        let plural = matches!(self.kind, RelationshipKind::HasMany);
        naming::infer_type_name(&self.name, plural)
    }
}

/// Optional settings for a relationship declaration, mirroring the
/// options accepted alongside each kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipOptions {
    pub record_type: Option<String>,
    pub foreign_key: Option<String>,
    pub order_by: Option<String>,
    pub source: Option<String>,
}

impl RelationshipOptions {
    /// No overrides; every convention applies.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Overrides the inferred target type name.
    #[must_use]
    pub fn with_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    /// Overrides the conventional foreign-key attribute.
    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    /// Sorts a has-many result ascending by the given attribute.
    #[must_use]
    pub fn ordered_by(mut self, attribute: impl Into<String>) -> Self {
        self.order_by = Some(attribute.into());
        self
    }

    /// Overrides the source relationship of a through association.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
