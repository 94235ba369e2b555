// User domain models

use crate::models::{Role, UserName};
use serde::Serialize;
use std::fmt;

/// Public user model, safe to return from the API.
///
/// Immutable value type created on registration. Updates would replace the
/// stored record rather than mutate it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: UserName,
    pub email: String,
    pub age: u32,
}

/// Internal user model used by authentication and the user store.
///
/// Carries the opaque password digest and the assigned role. Owned
/// exclusively by the user store and never serialized to API responses:
/// handlers convert through a presentation schema that has no password field.
#[derive(Clone, PartialEq, Eq)]
pub struct InternalUser {
    pub username: UserName,
    pub email: String,
    pub age: u32,
    pub hashed_password: String,
    pub role: Role,
}

impl InternalUser {
    /// Presentation-safe projection that drops the password digest.
    pub fn to_public(&self) -> User {
        User {
            username: self.username.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}

// The digest is redacted so a stray {:?} cannot leak it into logs.
impl fmt::Debug for InternalUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("age", &self.age)
            .field("hashed_password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}
