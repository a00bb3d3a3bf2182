use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::app::dto;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(dto::HealthResponse::healthy()))
}
