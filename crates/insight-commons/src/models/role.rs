// User roles for authorization decisions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a user account.
///
/// Authorization is decided by set membership against a route's allow-list,
/// never by per-user permission lists. The enumeration is closed: tokens or
/// registration payloads carrying any other value fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Returns the wire representation (`"user"` / `"admin"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
