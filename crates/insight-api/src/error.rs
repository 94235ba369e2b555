// API error boundary
//
// Every domain error crosses exactly one boundary on its way out: the
// `ResponseError` impl below converts it into the `{"detail": ...}` envelope
// with its own status code and emits exactly one log event. Unexpected
// errors keep their detail server-side and leave as a generic 500 phrase.

use crate::logging::render_event;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use insight_auth::AuthError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One field-level problem found while validating a request payload.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Validation failed")]
    Validation(Vec<ValidationIssue>),

    /// Anything else. The detail is logged, never returned to the caller.
    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    fn is_unexpected(&self) -> bool {
        matches!(
            self,
            ApiError::Internal(_) | ApiError::Auth(AuthError::Unexpected(_))
        )
    }

    fn detail(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(issues) => json!(issues),
            _ if self.is_unexpected() => json!("Internal Server Error"),
            _ => json!(self.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(inner) => match inner {
                AuthError::InvalidCredentials
                | AuthError::InvalidToken
                | AuthError::MissingAuthorization(_) => StatusCode::UNAUTHORIZED,
                AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
                AuthError::MalformedAuthorization(_) => StatusCode::BAD_REQUEST,
                AuthError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::UserAlreadyExists => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if self.is_unexpected() {
            // Full detail stays server-side.
            let detail = match self {
                ApiError::Internal(detail) => detail.clone(),
                other => other.to_string(),
            };
            tracing::error!(
                target: "insight",
                "{}",
                render_event(
                    "unexpected_error",
                    &[
                        ("status", status.as_u16().to_string()),
                        ("detail", detail),
                    ],
                )
            );
        } else {
            tracing::warn!(
                target: "insight",
                "{}",
                render_event(
                    "application_error",
                    &[
                        ("status", status.as_u16().to_string()),
                        ("message", self.to_string()),
                    ],
                )
            );
        }

        HttpResponse::build(status).json(json!({ "detail": self.detail() }))
    }
}
