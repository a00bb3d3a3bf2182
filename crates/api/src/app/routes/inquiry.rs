use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    response::Response,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// POST /api/v1/inquiry - account balance plus owning customer.
pub async fn inquire_balance(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::InquiryRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_request(rejection),
    };

    let outcome = services.orchestrator().inquire(&req.account).await;
    dto::outcome_to_response(outcome)
}
