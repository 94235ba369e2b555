// User registration, self-inspection, and admin listing

use crate::error::ApiError;
use crate::extractor::CurrentUser;
use crate::schemas::{UserCreate, UserResponse};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use insight_auth::rbac::require_roles;
use insight_commons::{InternalUser, Role, UserName};

/// Return the current authenticated user without the password digest.
pub async fn read_current_user(user: CurrentUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(&user.0)))
}

/// Register a new user.
///
/// Hashes the password, stores the internal record, and returns the public
/// projection with 201. A username that already exists (case-insensitively)
/// is a 409; the store itself overwrites, so the conflict check lives here.
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<UserCreate>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let username = payload.username.trim();
    if state.auth.users().get_by_username(username).is_some() {
        return Err(ApiError::UserAlreadyExists);
    }

    let hashed_password = state.auth.hasher().hash(&payload.password).await?;
    let user = InternalUser {
        username: UserName::new(username),
        email: payload.email,
        age: payload.age,
        hashed_password,
        role: payload.role,
    };
    state.auth.users().add(user.clone());

    state.logger.info(
        "user_created",
        &[
            ("username", user.username.to_string()),
            ("role", user.role.to_string()),
        ],
    );

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// List all registered users. Admin only.
pub async fn list_users(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    require_roles(&[Role::Admin], &user.0)?;

    let mut users = state.auth.users().list();
    users.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));

    let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
