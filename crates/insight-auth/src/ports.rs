// Security ports
//
// Capability contracts for the authentication flow. Each port has exactly one
// adapter in this system, but the flow is written against the trait so the
// hashing algorithm or signing scheme can be swapped without touching it.

use crate::error::AuthResult;
use crate::token::AccessTokenClaims;
use async_trait::async_trait;
use insight_commons::{Role, UserName};

/// Contract for the password hashing service.
///
/// `verify(p, hash(p)?)` always holds. Both operations are deliberately slow
/// (adaptive hashing) and run on the blocking pool, hence async.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a storage digest for the given plaintext password.
    async fn hash(&self, password: &str) -> AuthResult<String>;

    /// Check a plaintext password against a stored digest.
    ///
    /// A pure predicate: any mismatch, including a malformed stored digest,
    /// yields `false` rather than an error.
    async fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Contract for creating and validating access tokens.
pub trait TokenService: Send + Sync {
    /// Sign a new access token for the given subject and role.
    fn create_access_token(&self, subject: &UserName, role: Role) -> AuthResult<String>;

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Fails with `AuthError::InvalidToken` on signature mismatch, malformed
    /// structure, or expiry; the cases are indistinguishable to the caller.
    fn decode_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims>;
}
