// Type-safe wrapper for usernames (case-insensitive identity)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for usernames.
///
/// This newtype ensures usernames cannot be confused with other string
/// identifiers. The wrapped value preserves the caller's casing; identity
/// comparisons and store lookups go through [`UserName::to_lowercase`], since
/// usernames are case-insensitive identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Creates a new UserName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Lower-cased form used as the store key and for identity comparisons.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// True when the wrapped value is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
