use axum::{
    Router,
    routing::{get, post},
};

pub mod inquiry;
pub mod system;

/// Versioned API routes (mounted under `/api/v1`).
pub fn router() -> Router {
    Router::new()
        .route("/inquiry", post(inquiry::inquire_balance))
        .route("/health", get(system::health))
}
