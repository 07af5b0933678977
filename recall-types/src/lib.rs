//! Core types for Recall.
//!
//! Defines the two types every other Recall crate depends on:
//! - [`Identity`] — the canonical key a record is identity-mapped under
//! - [`Dataset`] — the nested, insertion-ordered payload a merge ingests
//!
//! These types carry no behavior beyond canonicalization and iteration;
//! the repository and merge semantics live in `recall-store`.

mod dataset;
mod identity;

pub use dataset::{AttrMap, Dataset, DatasetRows};
pub use identity::Identity;
