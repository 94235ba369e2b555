// Current-user extractor
//
// Handlers receive the resolved user as a parameter; the extractor reads the
// Authorization header, runs both authentication schemes through the shared
// resolution path, and binds the username into the logging context so the
// rest of the request's log lines carry it.

use crate::error::ApiError;
use crate::state::AppState;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use insight_auth::AuthError;
use insight_commons::InternalUser;
use std::future::Future;
use std::pin::Pin;

/// The authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub InternalUser);

impl CurrentUser {
    pub fn into_inner(self) -> InternalUser {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| {
                    ApiError::Internal(
                        "AppState not configured. Register it with web::Data::new.".to_string(),
                    )
                })?
                .clone();

            let auth_header = match req.headers().get("Authorization") {
                Some(value) => value.to_str().map_err(|_| {
                    ApiError::from(AuthError::MalformedAuthorization(
                        "Authorization header contains invalid characters".to_string(),
                    ))
                })?,
                None => {
                    return Err(ApiError::from(AuthError::MissingAuthorization(
                        "Authorization header is required. Use 'Authorization: Basic \
                         <credentials>' or 'Authorization: Bearer <token>'"
                            .to_string(),
                    )))
                }
            };

            let user = state.auth.resolve_current_user(auth_header).await?;

            state
                .logger
                .bind_context(&[("username", user.username.to_string())]);

            Ok(CurrentUser(user))
        })
    }
}
