// Authentication and current-user resolution
//
// Two entry protocols (Basic credentials, bearer token) converge on one
// invariant: resolution ends with a concrete InternalUser or a uniform
// failure. Nothing partial ever escapes this module.

use crate::basic_auth::parse_basic_auth_header;
use crate::error::{AuthError, AuthResult};
use crate::ports::{PasswordHasher, TokenService};
use crate::store::UserStore;
use insight_commons::InternalUser;
use std::sync::Arc;

/// Well-formed bcrypt digest that matches no pre-hashed password. Verified
/// against when the username is unknown so both rejection paths do
/// comparable work.
const DUMMY_DIGEST: &str = "$2b$12$wtfYd1k2mZ5ihgiJ9Gx0ruhZn0KQvCz3L7JYyGkXunfGs1Cqeym6G";

/// Authentication service composing the security ports with the user store.
///
/// Built once at bootstrap and shared across workers; holds no per-request
/// state.
pub struct AuthService {
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            hasher,
            tokens,
            users,
        }
    }

    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    pub fn hasher(&self) -> &Arc<dyn PasswordHasher> {
        &self.hasher
    }

    pub fn tokens(&self) -> &Arc<dyn TokenService> {
        &self.tokens
    }

    /// Authenticate with a username/password pair.
    ///
    /// Unknown username and wrong password fail identically, so error
    /// content cannot be used to enumerate accounts.
    pub async fn authenticate_basic(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<InternalUser> {
        let username = username.trim().to_lowercase();

        let Some(user) = self.users.get_by_username(&username) else {
            // Burn a verification against a dummy digest so the unknown-user
            // path does comparable work to the wrong-password path.
            let _ = self.hasher.verify(password, DUMMY_DIGEST).await;
            log::warn!("Authentication failed for unknown username '{}'", username);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.hashed_password).await {
            log::warn!("Invalid password for user '{}'", user.username);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate with a bearer token.
    ///
    /// The token must carry a valid signature, an unexpired timestamp, and a
    /// subject that still resolves to a stored user whose role matches the
    /// claim. Any deviation is the same `InvalidToken`.
    pub async fn authenticate_bearer(&self, token: &str) -> AuthResult<InternalUser> {
        let claims = self.tokens.decode_access_token(token)?;

        let Some(user) = self.users.get_by_username(&claims.sub) else {
            log::warn!("Valid token for nonexistent user '{}'", claims.sub);
            return Err(AuthError::InvalidToken);
        };

        if claims.role != user.role {
            log::warn!(
                "Token role mismatch for user '{}': claimed={}, actual={}",
                user.username,
                claims.role,
                user.role
            );
            return Err(AuthError::InvalidToken);
        }

        Ok(user)
    }

    /// Resolve the current user from an Authorization header value.
    ///
    /// Dispatches on the scheme prefix; both paths end in the same
    /// user-resolution logic.
    pub async fn resolve_current_user(&self, auth_header: &str) -> AuthResult<InternalUser> {
        if auth_header.starts_with("Basic ") {
            let credentials = parse_basic_auth_header(auth_header)?;
            self.authenticate_basic(&credentials.username, &credentials.password)
                .await
        } else if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let token = token.trim();
            if token.is_empty() {
                return Err(AuthError::MalformedAuthorization(
                    "Bearer token missing".to_string(),
                ));
            }
            self.authenticate_bearer(token).await
        } else {
            Err(AuthError::MalformedAuthorization(
                "Authorization header must start with 'Basic ' or 'Bearer '".to_string(),
            ))
        }
    }

    /// Authenticate credentials and issue a signed access token.
    pub async fn issue_token(&self, username: &str, password: &str) -> AuthResult<String> {
        let user = self.authenticate_basic(username, password).await?;
        self.tokens.create_access_token(&user.username, user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::{Sha512BcryptHasher, MIN_BCRYPT_COST};
    use crate::store::InMemoryUserStore;
    use crate::token::JwtTokenService;
    use insight_commons::{Role, UserName};
    use jsonwebtoken::Algorithm;

    const SECRET: &str = "test-secret";

    async fn service_with_users(users: &[(&str, &str, Role)]) -> AuthService {
        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(Sha512BcryptHasher::new(SECRET, MIN_BCRYPT_COST));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
            SECRET,
            Algorithm::HS256,
            chrono::Duration::minutes(15),
        ));
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());

        for (name, password, role) in users {
            let hashed_password = hasher.hash(password).await.unwrap();
            store.add(InternalUser {
                username: UserName::new(*name),
                email: format!("{}@example.com", name),
                age: 30,
                hashed_password,
                role: *role,
            });
        }

        AuthService::new(hasher, tokens, store)
    }

    #[tokio::test]
    async fn test_basic_auth_success() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;

        let user = service.authenticate_basic("john_doe", "qwerty123").await.unwrap();
        assert_eq!(user.username.as_str(), "john_doe");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_basic_auth_folds_username_case_and_whitespace() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;

        let user = service
            .authenticate_basic("  John_Doe ", "qwerty123")
            .await
            .unwrap();
        assert_eq!(user.username.as_str(), "john_doe");
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_fail_identically() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;

        let ghost = service.authenticate_basic("ghost", "anything").await;
        let wrong = service.authenticate_basic("john_doe", "wrong_password").await;

        assert_eq!(ghost, Err(AuthError::InvalidCredentials));
        assert_eq!(wrong, Err(AuthError::InvalidCredentials));
        // Identical error content for both failure modes.
        assert_eq!(
            ghost.unwrap_err().to_string(),
            wrong.unwrap_err().to_string()
        );
    }

    #[tokio::test]
    async fn test_bearer_roundtrip_resolves_same_user() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;

        let token = service.issue_token("john_doe", "qwerty123").await.unwrap();
        let user = service.authenticate_bearer(&token).await.unwrap();

        assert_eq!(user.username.as_str(), "john_doe");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_token_for_deleted_user_is_rejected() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;
        let token = service.issue_token("john_doe", "qwerty123").await.unwrap();

        // Same secret, same claims, but the subject no longer exists.
        let empty = service_with_users(&[]).await;
        assert_eq!(
            empty.authenticate_bearer(&token).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_token_role_mismatch_is_rejected() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;
        let token = service.issue_token("john_doe", "qwerty123").await.unwrap();

        // The stored role changes after issuance; the stale claim loses.
        let demoted = service.users().get_by_username("john_doe").unwrap();
        service.users().add(InternalUser {
            role: Role::Admin,
            ..demoted
        });

        assert_eq!(
            service.authenticate_bearer(&token).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_issue_token_rejects_bad_credentials() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;
        assert_eq!(
            service.issue_token("john_doe", "nope").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_resolve_dispatches_on_scheme() {
        let service = service_with_users(&[("john_doe", "qwerty123", Role::User)]).await;

        // base64("john_doe:qwerty123")
        let basic = "Basic am9obl9kb2U6cXdlcnR5MTIz";
        let user = service.resolve_current_user(basic).await.unwrap();
        assert_eq!(user.username.as_str(), "john_doe");

        let token = service.issue_token("john_doe", "qwerty123").await.unwrap();
        let user = service
            .resolve_current_user(&format!("Bearer {}", token))
            .await
            .unwrap();
        assert_eq!(user.username.as_str(), "john_doe");
    }

    #[tokio::test]
    async fn test_resolve_rejects_unknown_scheme_and_empty_bearer() {
        let service = service_with_users(&[]).await;

        assert!(matches!(
            service.resolve_current_user("Digest abc").await,
            Err(AuthError::MalformedAuthorization(_))
        ));
        assert!(matches!(
            service.resolve_current_user("Bearer   ").await,
            Err(AuthError::MalformedAuthorization(_))
        ));
    }
}
