//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Deposit API                        │
//! │                                                                         │
//! │  Browser                     Rust Backend                               │
//! │  ───────                     ────────────                               │
//! │                                                                         │
//! │  POST /api/calculate                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler: Result<Json<T>, ApiError>                              │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Body not JSON? ──────── JsonRejection ───────► 400 MALFORMED    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule violated? ──────── ValidationReport ────► 400 VALIDATION   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ─────────────────────────────────────► 200 {total, ...} │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  if (!res.ok) {                                                         │
//! │    // body.code = "VALIDATION_ERROR"                                    │
//! │    // body.errors.amount = "amount must be at least 1000"               │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deposit_core::ValidationReport;
use serde::Serialize;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what the browser receives when a request fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "amount must be at least 1000",
///   "errors": { "amount": "amount must be at least 1000" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationReport>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Body is not a JSON deposit request (400)
    MalformedRequest,

    /// Unknown route (404)
    NotFound,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError | ErrorCode::MalformedRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Creates a validation error carrying the per-field report.
    pub fn validation(report: ValidationReport) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: report.to_string(),
            errors: Some(report),
        }
    }

    /// Creates a not found error.
    pub fn not_found(path: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("No route for {path}"))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationReport> for ApiError {
    fn from(report: ValidationReport) -> Self {
        ApiError::validation(report)
    }
}

/// Converts body extraction failures (bad JSON, wrong content type).
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Rejected request body");
        ApiError::new(ErrorCode::MalformedRequest, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use deposit_core::{Field, ValidationError};

    use super::*;

    #[test]
    fn test_validation_error_body() {
        let report: ValidationReport = [ValidationError::BelowMinimum {
            field: Field::Amount,
            min: 1_000.0,
        }]
        .into_iter()
        .collect();

        let json = serde_json::to_value(ApiError::validation(report)).unwrap();

        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "amount must be at least 1000");
        assert_eq!(json["errors"]["amount"], "amount must be at least 1000");
    }

    #[test]
    fn test_plain_error_omits_errors() {
        let json = serde_json::to_value(ApiError::internal("boom")).unwrap();

        assert_eq!(json["code"], "INTERNAL");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MalformedRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
