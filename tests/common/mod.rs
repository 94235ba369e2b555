// Shared helpers for integration tests
#![allow(dead_code)]

use base64::prelude::*;
use insight_api::AppState;
use insight_auth::password::MIN_BCRYPT_COST;
use insight_commons::{InternalUser, Role, ServerConfig, UserName};

pub const ADMIN_USERNAME: &str = "jane_admin";
pub const ADMIN_PASSWORD: &str = "adminsecret1";

/// Application state with a cheap hashing cost, the seeded development user,
/// and one admin account for authorization tests.
pub async fn test_state() -> AppState {
    let mut config = ServerConfig::default();
    config.auth.secret_key = "integration-test-secret".to_string();
    config.auth.bcrypt_cost = MIN_BCRYPT_COST;

    let state = AppState::from_config(config).expect("test config must be valid");
    state.seed().await.expect("seeding must succeed");

    let hashed_password = state
        .auth
        .hasher()
        .hash(ADMIN_PASSWORD)
        .await
        .expect("hashing must succeed");
    state.auth.users().add(InternalUser {
        username: UserName::new(ADMIN_USERNAME),
        email: "jane@example.com".to_string(),
        age: 34,
        hashed_password,
        role: Role::Admin,
    });

    state
}

/// `Authorization: Basic ...` header pair for the given credentials.
pub fn basic_auth(username: &str, password: &str) -> (&'static str, String) {
    let encoded = BASE64_STANDARD.encode(format!("{}:{}", username, password));
    ("Authorization", format!("Basic {}", encoded))
}

/// `Authorization: Bearer ...` header pair for the given token.
pub fn bearer_auth(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Build the full application (middleware + routes) around a test state.
///
/// A macro because the composed `App` type cannot be named in a helper
/// function signature.
#[macro_export]
macro_rules! init_test_app {
    ($state:expr) => {{
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .wrap(insight_api::middleware::RequestLogging::new(
                    $state.logger.clone(),
                ))
                .wrap(insight_api::middleware::RequestId::new())
                .configure(insight_api::routes::configure),
        )
        .await
    }};
}
