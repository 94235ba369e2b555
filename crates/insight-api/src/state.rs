// Application state: explicit dependency construction
//
// Every service singleton is built once at process start and handed down via
// this struct instead of living behind ambient static accessors. Tests build
// their own instance with a cheap hashing cost and never need global reset
// logic.

use crate::logging::{Logger, TracingLogger};
use insight_auth::password::Sha512BcryptHasher;
use insight_auth::store::seed_dev_user;
use insight_auth::token::algorithm_from_str;
use insight_auth::{
    AuthService, InMemoryUserStore, JwtTokenService, PasswordHasher, TokenService, UserStore,
};
use insight_commons::config::ConfigError;
use insight_commons::ServerConfig;
use std::sync::Arc;

/// Shared application state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub auth: Arc<AuthService>,
    pub logger: Arc<dyn Logger>,
}

impl AppState {
    /// Construct all singletons from a validated configuration.
    pub fn from_config(config: ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let algorithm = algorithm_from_str(&config.jwt.algorithm).ok_or_else(|| {
            ConfigError::Invalid(format!("Unsupported JWT algorithm: {}", config.jwt.algorithm))
        })?;

        let hasher: Arc<dyn PasswordHasher> = Arc::new(Sha512BcryptHasher::new(
            config.auth.secret_key.clone(),
            config.auth.bcrypt_cost,
        ));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
            config.auth.secret_key.clone(),
            algorithm,
            chrono::Duration::minutes(config.jwt.access_token_expire_minutes),
        ));
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let auth = Arc::new(AuthService::new(hasher, tokens, users));

        Ok(Self {
            config: Arc::new(config),
            auth,
            logger: Arc::new(TracingLogger::new()),
        })
    }

    /// Seed startup data (currently the fixed development user).
    pub async fn seed(&self) -> Result<(), insight_auth::AuthError> {
        if self.config.auth.seed_dev_user {
            seed_dev_user(self.auth.users(), self.auth.hasher()).await?;
        }
        Ok(())
    }
}
