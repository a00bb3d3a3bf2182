use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::app::dto::ErrorResponse;

/// Error body in the same envelope as successful inquiries.
pub fn json_error(
    status: StatusCode,
    message: impl Into<String>,
    error: Option<String>,
) -> axum::response::Response {
    (status, axum::Json(ErrorResponse::new(status, message, error))).into_response()
}

/// Body could not be read as an inquiry request (bad JSON, wrong shape, wrong content type).
pub fn invalid_request(rejection: JsonRejection) -> axum::response::Response {
    tracing::debug!(error = %rejection.body_text(), "rejected inquiry request body");
    json_error(
        StatusCode::BAD_REQUEST,
        "Invalid request format",
        Some(rejection.body_text()),
    )
}
