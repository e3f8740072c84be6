use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::server::model::api::HealthDto;

/// GET /health - Liveness check
///
/// # Returns
/// - `200 OK`: `{"status": "OK", "timestamp": "<RFC 3339>"}`
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthDto {
            status: "OK".to_string(),
            timestamp: Utc::now(),
        }),
    )
}
