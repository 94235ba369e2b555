// Liveness probe

use actix_web::HttpResponse;
use serde_json::json;

/// Always returns 200 while the process is up.
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
