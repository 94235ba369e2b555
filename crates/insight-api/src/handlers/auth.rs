// Token issuance

use crate::error::ApiError;
use crate::schemas::{TokenRequest, TokenResponse};
use crate::state::AppState;
use actix_web::{web, Either, HttpResponse};

/// Authenticate credentials and return a signed access token.
///
/// Accepts either a form body (OAuth2 password-flow style) or JSON.
pub async fn issue_token(
    state: web::Data<AppState>,
    payload: Either<web::Form<TokenRequest>, web::Json<TokenRequest>>,
) -> Result<HttpResponse, ApiError> {
    let payload = match payload {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    };

    let token = state
        .auth
        .issue_token(&payload.username, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
