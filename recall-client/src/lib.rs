//! Transport seam for Recall.
//!
//! The repository core is synchronous and in-process; everything that
//! crosses the network lives here, behind the [`Transport`] trait:
//!
//! - [`Client`] — orchestrates create and fetch round-trips, feeding the
//!   results to a `Repository`
//! - [`Transport`] — the adapter contract (`perform_create` /
//!   `perform_fetch`), with a [`transport::mock`] implementation for tests
//! - [`to_resource_params`] — flattens a create payload into parameters
//!   namespaced by the underscored type name
//!
//! The core defines no retry policy: a failed round-trip simply means no
//! merge occurs.

mod client;
mod error;
mod params;
pub mod transport;

pub use client::{Client, FetchOptions, MergeHook};
pub use error::{ClientError, ClientResult};
pub use params::{to_resource_params, ParamMap};
pub use transport::{CreateResponse, Transport};
