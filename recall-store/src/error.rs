//! Error types for the repository core.

use thiserror::Error;

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the repository core.
///
/// Every variant names the offending type or relationship. The only
/// place an error is deliberately swallowed is the event dispatcher,
/// where one misbehaving handler must not block its siblings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record type cannot be registered.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A merge carried data for a type name with no registration.
    #[error("record type '{0}' is not registered")]
    UnregisteredType(String),

    /// A relationship was traversed before its target type was
    /// registered, or type-name inference failed.
    #[error("cannot resolve association '{name}': {reason}")]
    UnresolvedAssociation { name: String, reason: String },

    /// A created payload carried no usable `id` attribute.
    #[error("created payload for '{0}' has no 'id' attribute")]
    MissingIdentity(String),
}
