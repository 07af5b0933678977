//! Error types for the client layer.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to a transport.
///
/// A transport failure means no merge occurs — observably identical to a
/// request that never completes. Retry and backoff are the transport's
/// own business.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not complete the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The repository rejected the merged data.
    #[error(transparent)]
    Store(#[from] recall_store::StoreError),
}
