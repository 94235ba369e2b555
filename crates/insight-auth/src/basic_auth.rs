// HTTP Basic Authentication parser

use crate::error::{AuthError, AuthResult};
use base64::prelude::*;
use std::fmt;

/// Transient credential pair parsed from a Basic auth header.
///
/// Lives for the duration of one request and is never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// The password is redacted so a stray {:?} cannot leak it into logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Parse an HTTP Basic Auth header into credentials.
///
/// Expected format: `Authorization: Basic <base64-encoded-username:password>`
///
/// # Errors
/// `AuthError::MalformedAuthorization` when the prefix, base64 payload, or
/// `username:password` structure is invalid.
pub fn parse_basic_auth_header(auth_header: &str) -> AuthResult<Credentials> {
    let encoded = auth_header.strip_prefix("Basic ").ok_or_else(|| {
        AuthError::MalformedAuthorization(
            "Authorization header must start with 'Basic '".to_string(),
        )
    })?;

    let decoded_bytes = BASE64_STANDARD.decode(encoded.as_bytes()).map_err(|e| {
        AuthError::MalformedAuthorization(format!("Invalid base64 encoding: {}", e))
    })?;

    let decoded_str = String::from_utf8(decoded_bytes).map_err(|e| {
        AuthError::MalformedAuthorization(format!("Invalid UTF-8 in credentials: {}", e))
    })?;

    extract_credentials(&decoded_str)
}

/// Split a decoded `username:password` string.
///
/// Only the first colon separates; passwords may contain colons.
fn extract_credentials(credentials: &str) -> AuthResult<Credentials> {
    let mut parts = credentials.splitn(2, ':');

    let username = parts.next().ok_or_else(|| {
        AuthError::MalformedAuthorization("Missing username in credentials".to_string())
    })?;

    let password = parts.next().ok_or_else(|| {
        AuthError::MalformedAuthorization(
            "Credentials must be in format 'username:password'".to_string(),
        )
    })?;

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
