//! The Recall core: an in-process, identity-mapped record repository.
//!
//! Records arrive piecemeal from independent fetches, get deduplicated by
//! identity, and expose navigable relationships without ever
//! materializing them at merge time. The pieces:
//!
//! - [`Repository`] — per-type identity maps plus the type registry
//! - merge engine ([`Repository::merge`]) — insert-only batch ingestion
//!   followed by grouped `create` notification
//! - relationship resolver ([`Repository::relation`]) — lazy traversal of
//!   has-many / has-many-through / has-one / belongs-to declarations
//! - [`Conditions`] — full-scan attribute queries with loose scalar
//!   equality
//! - [`Queryable`] — the read-only capability surface handed to view
//!   code and event handlers
//!
//! All operations are synchronous; the only asynchrony in the system is
//! the transport round-trip in `recall-client`, and merges run strictly
//! inside its completion path.

mod error;
mod merge;
mod query;
mod registry;
mod repository;
mod resolver;

pub use error::{StoreError, StoreResult};
pub use query::Conditions;
pub use registry::Handler;
pub use repository::{Queryable, Repository, CREATE_EVENT};
pub use resolver::Related;
