// Access token issuance and validation

use crate::error::{AuthError, AuthResult};
use crate::ports::TokenService;
use insight_commons::{Role, UserName};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Typed claims carried by every access token.
///
/// A fixed structure instead of a dynamic claim map: a token that parses has
/// a subject, a role, and an expiry by construction, so downstream code never
/// does ad hoc key lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Role recorded at issuance
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Map a configuration string onto a supported signing algorithm.
///
/// The configuration layer validates against the same set, so a `None` here
/// means the config was bypassed.
pub fn algorithm_from_str(value: &str) -> Option<Algorithm> {
    match value {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

/// Stateless JWT token service.
///
/// Construction fixes the signing secret, algorithm, and token lifetime for
/// the life of the process. The server keeps no token registry: validity is
/// wholly determined by signature and expiry at decode time.
pub struct JwtTokenService {
    secret: String,
    algorithm: Algorithm,
    expiration: chrono::Duration,
}

impl JwtTokenService {
    pub fn new(secret: impl Into<String>, algorithm: Algorithm, expiration: chrono::Duration) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            expiration,
        }
    }
}

impl TokenService for JwtTokenService {
    fn create_access_token(&self, subject: &UserName, role: Role) -> AuthResult<String> {
        let expires_at = chrono::Utc::now() + self.expiration;
        let claims = AccessTokenClaims {
            sub: subject.as_str().to_string(),
            role,
            exp: expires_at.timestamp() as usize,
        };

        let header = Header::new(self.algorithm);
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AuthError::Unexpected(format!("JWT encoding error: {}", e)))
    }

    fn decode_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        // Expiry is exact; the default 60s leeway would honor expired tokens.
        validation.leeway = 0;

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<AccessTokenClaims>(token, &decoding_key, &validation)
            .map_err(|e| {
                // The cause stays server-side. Callers see one uniform error
                // so token validation cannot be used as an oracle.
                log::debug!("Access token rejected: {}", e);
                AuthError::InvalidToken
            })?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            log::debug!("Access token rejected: empty subject claim");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
