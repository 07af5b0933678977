//! Canonical record identities.
//!
//! Identities arrive from the server as JSON object keys (strings) or as
//! numeric attributes. Both map to one canonical string form so `1` and
//! `"1"` address the same record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The key a record is identity-mapped under, unique within its type.
///
/// Always stored in canonical string form; numeric identities are
/// rendered through their JSON display form on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from an already-canonical key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Canonicalizes a JSON scalar into an identity.
    ///
    /// Strings are taken as-is, numbers via their JSON rendering.
    /// Null, booleans, arrays, and objects have no identity form.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// The canonical key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for Identity {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<i64> for Identity {
    fn from(key: i64) -> Self {
        Self(key.to_string())
    }
}

impl From<u64> for Identity {
    fn from(key: u64) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}
