// User storage: repository contract and in-memory implementation

use crate::error::AuthResult;
use crate::ports::PasswordHasher;
use insight_commons::{InternalUser, Role, UserName};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Fixed development user seeded at startup.
pub const DEV_USERNAME: &str = "john_doe";
pub const DEV_EMAIL: &str = "john@gmail.de";
pub const DEV_AGE: u32 = 25;
pub const DEV_PASSWORD: &str = "qwerty123";

/// Abstraction over user persistence for authentication flows.
pub trait UserStore: Send + Sync {
    /// Insert or overwrite a user under the lower-cased username key.
    ///
    /// Callers wanting "already exists" semantics must check
    /// [`UserStore::get_by_username`] first; the store itself overwrites.
    fn add(&self, user: InternalUser);

    /// Case-insensitive lookup. Absence is an ordinary `None`, not an error.
    fn get_by_username(&self, username: &str) -> Option<InternalUser>;

    /// Snapshot copy of all users. Mutating the result does not touch the store.
    fn list(&self) -> Vec<InternalUser>;
}

/// In-memory user store guarded by a readers-writer lock.
///
/// Concurrent requests may register and resolve users simultaneously, so
/// reads share the lock and writes take it exclusively. A poisoned lock is
/// recovered rather than propagated: a panicking writer must not take
/// authentication down with it.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, InternalUser>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn add(&self, user: InternalUser) {
        let key = user.username.to_lowercase();
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, user);
    }

    fn get_by_username(&self, username: &str) -> Option<InternalUser> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&username.to_lowercase())
            .cloned()
    }

    fn list(&self) -> Vec<InternalUser> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

/// Seed the fixed development user if absent.
///
/// Runs once during bootstrap, before the server starts accepting requests.
pub async fn seed_dev_user(
    store: &Arc<dyn UserStore>,
    hasher: &Arc<dyn PasswordHasher>,
) -> AuthResult<()> {
    if store.get_by_username(DEV_USERNAME).is_some() {
        return Ok(());
    }

    let hashed_password = hasher.hash(DEV_PASSWORD).await?;
    store.add(InternalUser {
        username: UserName::new(DEV_USERNAME),
        email: DEV_EMAIL.to_string(),
        age: DEV_AGE,
        hashed_password,
        role: Role::User,
    });
    log::info!("Seeded development user '{}'", DEV_USERNAME);
    Ok(())
}
