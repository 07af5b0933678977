//! Transport layer abstraction.
//!
//! Defines the trait a concrete adapter (HTTP, IPC, fixtures) implements
//! so the client can perform create and fetch round-trips against any
//! backend. The core never interprets locators; they pass through to the
//! adapter opaquely.

use crate::error::ClientResult;
use crate::params::ParamMap;
use async_trait::async_trait;
use recall_types::{AttrMap, Dataset};
use serde::{Deserialize, Serialize};

/// The body of a successful create response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResponse {
    /// The attribute bag of the record the server created, including the
    /// identity it assigned.
    pub created: AttrMap,
}

/// A transport that can create records and fetch datasets.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a create request against a collection locator.
    async fn perform_create(
        &self,
        locator: &str,
        params: &ParamMap,
    ) -> ClientResult<CreateResponse>;

    /// Performs a fetch against a locator, returning the dataset the
    /// merge engine will ingest.
    async fn perform_fetch(&self, locator: &str) -> ClientResult<Dataset>;
}

/// A mock transport for testing.
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// One request as the mock observed it.
    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedRequest {
        Create { locator: String, params: ParamMap },
        Fetch { locator: String },
    }

    /// A transport that records requests and replays queued responses.
    #[derive(Default)]
    pub struct MockTransport {
        requests: Mutex<Vec<RecordedRequest>>,
        create_responses: Mutex<VecDeque<ClientResult<CreateResponse>>>,
        fetch_responses: Mutex<VecDeque<ClientResult<Dataset>>>,
    }

    impl MockTransport {
        /// Creates a mock with no queued responses.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues the next create response.
        pub fn queue_create(&self, response: ClientResult<CreateResponse>) {
            self.create_responses.lock().unwrap().push_back(response);
        }

        /// Queues the next fetch response.
        pub fn queue_fetch(&self, response: ClientResult<Dataset>) {
            self.fetch_responses.lock().unwrap().push_back(response);
        }

        /// Every request performed so far, in order.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn perform_create(
            &self,
            locator: &str,
            params: &ParamMap,
        ) -> ClientResult<CreateResponse> {
            self.requests.lock().unwrap().push(RecordedRequest::Create {
                locator: locator.to_owned(),
                params: params.clone(),
            });
            self.create_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(crate::error::ClientError::Transport(
                        "no queued create response".to_owned(),
                    ))
                })
        }

        async fn perform_fetch(&self, locator: &str) -> ClientResult<Dataset> {
            self.requests.lock().unwrap().push(RecordedRequest::Fetch {
                locator: locator.to_owned(),
            });
            self.fetch_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(crate::error::ClientError::Transport(
                        "no queued fetch response".to_owned(),
                    ))
                })
        }
    }
}
