// Configuration module
//
// Loaded from config.toml with serde field defaults, then overridden from
// INSIGHT_* environment variables so secret material never has to live in the
// config file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Signing algorithms the token service accepts.
pub const SUPPORTED_JWT_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

const MIN_TOKEN_EXPIRE_MINUTES: i64 = 1;
const MAX_TOKEN_EXPIRE_MINUTES: i64 = 525_600;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub jwt: JwtSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads; 0 lets the runtime pick one per core.
    #[serde(default)]
    pub workers: usize,
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Server-wide secret mixed into the password pre-hash and used to sign
    /// tokens. Override with INSIGHT_SECRET_KEY outside local development.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Bcrypt cost factor. Higher is slower and stronger.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Seed the fixed development user at startup.
    #[serde(default = "default_true")]
    pub seed_dev_user: bool,
}

/// JWT settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// Log file path; empty disables the file layer.
    #[serde(default)]
    pub file_path: String,
    /// Per-target level overrides, e.g. `insight_auth = "debug"`.
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_secret_key() -> String {
    "dev_secret".to_string()
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            bcrypt_cost: default_bcrypt_cost(),
            seed_dev_user: true,
        }
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            algorithm: default_jwt_algorithm(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_to_console: true,
            file_path: String::new(),
            targets: HashMap::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, apply environment overrides, and
    /// validate the result.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: ServerConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for when no config file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(secret) = env::var("INSIGHT_SECRET_KEY") {
            if !secret.is_empty() {
                self.auth.secret_key = secret;
            }
        }
        if let Ok(port) = env::var("INSIGHT_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => log::warn!("Ignoring non-numeric INSIGHT_PORT value"),
            }
        }
        if let Ok(level) = env::var("INSIGHT_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }

    /// Reject configurations the security core cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_JWT_ALGORITHMS.contains(&self.jwt.algorithm.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Unsupported JWT algorithm: {}. Must be one of: {:?}",
                self.jwt.algorithm, SUPPORTED_JWT_ALGORITHMS
            )));
        }

        let expire = self.jwt.access_token_expire_minutes;
        if !(MIN_TOKEN_EXPIRE_MINUTES..=MAX_TOKEN_EXPIRE_MINUTES).contains(&expire) {
            return Err(ConfigError::Invalid(format!(
                "Token expiration must be between {} and {} minutes, got {}",
                MIN_TOKEN_EXPIRE_MINUTES, MAX_TOKEN_EXPIRE_MINUTES, expire
            )));
        }

        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::Invalid(
                "auth.secret_key must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
