// Authentication error types

use thiserror::Error;

/// Result alias used throughout the authentication crate.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors produced by the authentication core.
///
/// `InvalidCredentials` and `InvalidToken` deliberately carry no detail:
/// whether a username exists, or which token check failed, must not be
/// recoverable from the error surfaced to the caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password. One message for both cases.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Signature mismatch, malformed structure, expired token, or a subject
    /// that no longer resolves. One message for all cases.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Authenticated, but the role is not in the route's allow-list.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    MissingAuthorization(String),

    #[error("{0}")]
    MalformedAuthorization(String),

    /// Hashing or signing machinery failed. Surfaces as a generic 500.
    #[error("Internal authentication error: {0}")]
    Unexpected(String),
}
