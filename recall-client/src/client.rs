//! Create/fetch orchestration.
//!
//! The client owns the strict ordering contract around a fetch: the
//! `before_merge` hook observes repository state as of before the
//! response's data is inserted, then the merge runs to completion, then
//! `after_merge` observes the fully merged state. Both hooks and the
//! merge itself run synchronously inside the transport's completion path.

use crate::error::ClientResult;
use crate::params::to_resource_params;
use crate::transport::Transport;
use recall_model::{Record, SharedRecord};
use recall_store::Repository;
use recall_types::AttrMap;
use std::sync::Arc;
use tracing::debug;

/// A hook observing repository state around a merge.
pub type MergeHook = Box<dyn FnOnce(&Repository) + Send>;

/// Options for a fetch round-trip.
#[derive(Default)]
pub struct FetchOptions {
    locator: Option<String>,
    before_merge: Option<MergeHook>,
    after_merge: Option<MergeHook>,
}

impl FetchOptions {
    /// Defaults: the type's (or record's) own locator, no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the locator the fetch is performed against.
    #[must_use]
    pub fn locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    /// Runs before the fetched dataset is merged.
    #[must_use]
    pub fn before_merge<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&Repository) + Send + 'static,
    {
        self.before_merge = Some(Box::new(hook));
        self
    }

    /// Runs after the fetched dataset is merged.
    #[must_use]
    pub fn after_merge<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&Repository) + Send + 'static,
    {
        self.after_merge = Some(Box::new(hook));
        self
    }
}

/// Performs create and fetch operations against a transport and feeds
/// the results to a repository.
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client over a transport adapter.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Creates a record optimistically: encodes the attributes as
    /// namespaced parameters, posts them to the type's locator, and
    /// inserts one record from the response's `created` payload. Fires
    /// `create` for exactly that record.
    ///
    /// A transport failure surfaces as the error and no insert occurs.
    pub async fn create(
        &self,
        repo: &mut Repository,
        type_name: &str,
        attributes: AttrMap,
    ) -> ClientResult<SharedRecord> {
        let locator = repo.schema(type_name)?.locator.clone();
        let params = to_resource_params(type_name, &attributes);
        debug!(type_name, %locator, "performing create");
        let response = self.transport.perform_create(&locator, &params).await?;
        Ok(repo.insert_created(type_name, response.created)?)
    }

    /// Fetches a dataset from the type's locator (or an override) and
    /// merges it, running the hooks in strict before/merge/after order.
    /// Returns the records the merge inserted.
    pub async fn fetch(
        &self,
        repo: &mut Repository,
        type_name: &str,
        options: FetchOptions,
    ) -> ClientResult<Vec<SharedRecord>> {
        let locator = match options.locator {
            Some(locator) => locator,
            None => repo.schema(type_name)?.locator.clone(),
        };
        debug!(type_name, %locator, "performing fetch");
        let dataset = self.transport.perform_fetch(&locator).await?;

        if let Some(hook) = options.before_merge {
            hook(repo);
        }
        let created = repo.merge(dataset)?;
        if let Some(hook) = options.after_merge {
            hook(repo);
        }
        Ok(created)
    }

    /// Fetches against one record's own locator: the type's base locator
    /// extended with the record's identity.
    pub async fn fetch_record(
        &self,
        repo: &mut Repository,
        record: &Record,
        options: FetchOptions,
    ) -> ClientResult<Vec<SharedRecord>> {
        let options = if options.locator.is_some() {
            options
        } else {
            let locator = repo.schema(&record.type_name)?.record_locator(&record.id);
            options.locator(locator)
        };
        self.fetch(repo, &record.type_name, options).await
    }
}
