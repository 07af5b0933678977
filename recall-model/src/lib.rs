//! Record and schema model for Recall.
//!
//! Defines the declarative half of the system:
//! - [`Record`] — one identity-mapped instance (attribute bag + identity)
//! - [`RecordType`] — a registered schema: name, resource locator, and
//!   relationship declarations
//! - [`Relationship`] — flat descriptor metadata for the four association
//!   kinds (has-many, has-many-through, has-one, belongs-to)
//! - [`naming`] — the pure casing/number conventions used to infer type
//!   names and foreign keys, overridable at every declaration site
//!
//! Nothing here touches repository state; resolution of relationships
//! against live tables happens in `recall-store`.

pub mod naming;
mod record;
mod schema;

pub use record::{Record, SharedRecord};
pub use schema::{RecordType, Relationship, RelationshipKind, RelationshipOptions};
