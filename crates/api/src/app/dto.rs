use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use inquiry_infra::{InquiryOutcome, OutcomeKind};
use inquiry_records::{AccountRecord, CustomerRecord};

use crate::app::errors;

pub const SERVICE_NAME: &str = "inquiry-balance-api";

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    /// Missing and empty are treated alike (both rejected as blank).
    #[serde(default)]
    pub account: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct InquiryResponse {
    pub response_code: String,
    pub response_message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub response_code: String,
    pub response_message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            response_code: status.as_u16().to_string(),
            response_message: message.into(),
            timestamp: now_rfc3339(),
            error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: now_rfc3339(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// -------------------------
// Outcome mapping
// -------------------------

pub fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Success | OutcomeKind::PartialSuccess => StatusCode::OK,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::InvalidInput => StatusCode::BAD_REQUEST,
        OutcomeKind::Error => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render an inquiry outcome: records for (partial) successes, an error envelope otherwise.
///
/// Only store failures echo their cause, as diagnostic text.
pub fn outcome_to_response(outcome: InquiryOutcome) -> Response {
    let status = status_for(outcome.kind());
    let message = outcome.message();

    match outcome {
        InquiryOutcome::Success { account, customer } => {
            found(status, message, account, Some(customer))
        }
        InquiryOutcome::PartialSuccess { account, .. } => found(status, message, account, None),
        InquiryOutcome::Error { cause } => errors::json_error(status, message, Some(cause.to_string())),
        InquiryOutcome::NotFound { .. } | InquiryOutcome::InvalidInput { .. } => {
            errors::json_error(status, message, None)
        }
    }
}

fn found(
    status: StatusCode,
    message: &str,
    account: AccountRecord,
    customer: Option<CustomerRecord>,
) -> Response {
    let body = InquiryResponse {
        response_code: status.as_u16().to_string(),
        response_message: message.to_string(),
        timestamp: now_rfc3339(),
        account: Some(account),
        customer,
    };
    (status, axum::Json(body)).into_response()
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquiry_infra::RecordStoreError;

    #[test]
    fn every_outcome_kind_has_its_status() {
        assert_eq!(status_for(OutcomeKind::Success), StatusCode::OK);
        assert_eq!(status_for(OutcomeKind::PartialSuccess), StatusCode::OK);
        assert_eq!(status_for(OutcomeKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(OutcomeKind::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(OutcomeKind::Error), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_failures_map_to_500() {
        let res = outcome_to_response(InquiryOutcome::Error {
            cause: RecordStoreError::Unavailable("refused".into()),
        });
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_envelope_omits_absent_error_text() {
        let body = ErrorResponse::new(StatusCode::NOT_FOUND, "Account not found", None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_code"], "404");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn missing_account_field_reads_as_blank() {
        let req: InquiryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.account, "");
    }
}
