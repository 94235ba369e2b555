// Prediction endpoint — thin wrapper over the stateless inference stub

use crate::error::ApiError;
use crate::schemas::PredictResponse;
use actix_web::{web, HttpResponse};
use insight_commons::{predict_from_features, PredictionFeatures};

/// Return the stub model's prediction for the given features.
pub async fn predict(
    payload: web::Json<PredictionFeatures>,
) -> Result<HttpResponse, ApiError> {
    let prediction = predict_from_features(&payload);
    Ok(HttpResponse::Ok().json(PredictResponse { prediction }))
}
