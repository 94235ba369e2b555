// HTTP route registration

use crate::error::{ApiError, ValidationIssue};
use crate::handlers::{auth, health, predictions, users};
use actix_web::{error, web, HttpRequest};

/// Register all routes and payload-extraction error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::FormConfig::default().error_handler(form_error_handler))
        .route("/health", web::get().to(health::healthz))
        .service(
            web::scope("/api/v1")
                .route("/auth/token", web::post().to(auth::issue_token))
                .route("/users/me", web::get().to(users::read_current_user))
                .route("/users", web::post().to(users::create_user))
                .route("/users", web::get().to(users::list_users))
                .route("/predictions", web::post().to(predictions::predict)),
        );
}

/// Map malformed JSON payloads into the standard validation envelope.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(vec![ValidationIssue::new("body", err.to_string())]).into()
}

/// Map malformed form payloads into the standard validation envelope.
fn form_error_handler(err: error::UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(vec![ValidationIssue::new("body", err.to_string())]).into()
}
