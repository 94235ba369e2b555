// Password hashing adapter: SHA-512 pre-hash + bcrypt

use crate::error::{AuthError, AuthResult};
use crate::ports::PasswordHasher;
use async_trait::async_trait;
use bcrypt::DEFAULT_COST;
use sha2::{Digest, Sha512};

/// Bcrypt cost factor used in production. Higher values = more secure but slower.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Lowest cost bcrypt accepts. Only suitable for tests, where hashing speed
/// matters more than strength.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Password hasher combining a keyed SHA-512 pre-hash with bcrypt.
///
/// Bcrypt ignores input beyond 72 bytes. Pre-hashing the password together
/// with the server-wide secret normalizes arbitrary-length passwords to a
/// fixed-size, high-entropy input before the adaptive stage, and ties stored
/// digests to the secret so a stolen dump cannot be cracked without it.
pub struct Sha512BcryptHasher {
    secret: String,
    cost: u32,
}

impl Sha512BcryptHasher {
    pub fn new(secret: impl Into<String>, cost: u32) -> Self {
        Self {
            secret: secret.into(),
            cost,
        }
    }

    /// SHA-512 over `password ++ secret`, hex encoded.
    ///
    /// The same transformation runs on both hash and verify, so the bcrypt
    /// layer only ever sees 128-byte hex strings.
    fn prehash(&self, password: &str) -> String {
        let mut hasher = Sha512::new();
        hasher.update(password.as_bytes());
        hasher.update(self.secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl PasswordHasher for Sha512BcryptHasher {
    async fn hash(&self, password: &str) -> AuthResult<String> {
        let prehashed = self.prehash(password);
        let cost = self.cost;

        // Run bcrypt on the blocking thread pool (CPU-intensive)
        tokio::task::spawn_blocking(move || {
            bcrypt::hash(prehashed, cost).map_err(|e| AuthError::Unexpected(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::Unexpected(format!("Task join error: {}", e)))?
    }

    async fn verify(&self, password: &str, digest: &str) -> bool {
        let prehashed = self.prehash(password);
        let digest = digest.to_string();

        let result =
            tokio::task::spawn_blocking(move || bcrypt::verify(prehashed, &digest)).await;

        match result {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                log::warn!("Password verification against malformed digest: {}", e);
                false
            }
            Err(e) => {
                log::warn!("Password verification task failed: {}", e);
                false
            }
        }
    }
}
