//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: record store + orchestrator construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response bodies and outcome mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use inquiry_infra::config::InquiryConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
///
/// Initializes the record store exactly once; the returned router shares it
/// across all requests.
pub async fn build_app(config: &InquiryConfig) -> Result<Router, services::ServiceError> {
    let services = services::build_services(config).await?;
    Ok(router(Arc::new(services)))
}

/// Router over already-built services (tests inject their own stores here).
pub fn router(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .nest("/api/v1", routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::very_permissive()),
        )
}
