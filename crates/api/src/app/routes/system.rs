use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use crate::app::dto::{self, HealthPayload, Success};
use crate::app::errors;

pub async fn health() -> Json<Success<HealthPayload>> {
    dto::success(HealthPayload {
        status: "ok",
        timestamp: Utc::now(),
    })
}

/// Unknown routes still answer in the `{"error": ...}` shape.
pub async fn not_found() -> impl IntoResponse {
    errors::json_error(StatusCode::NOT_FOUND, "route not found")
}
