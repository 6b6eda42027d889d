//! # HTTP Handlers
//!
//! Thin wrappers between JSON bodies and `deposit-core`.
//!
//! ## Request Flow
//! ```text
//! POST /api/calculate {amount, months, rate}
//!   │
//!   ├── body not JSON             → 400 MALFORMED_REQUEST
//!   ├── field missing / null      → Required
//!   ├── validate_field per field  → BelowMinimum / AboveMaximum / ...
//!   │     └── any violation?      → 400 VALIDATION_ERROR {errors}
//!   ├── calculate()
//!   └── round to cents            → 200 {total, profit}
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use axum::Json;
use deposit_core::validation::validate_field;
use deposit_core::{
    calculate, DepositRequest, DepositResponse, Field, NormalizedValue, ValidationError,
    ValidationReport,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::ApiError;

/// Body of `POST /api/calculate`.
///
/// Fields are optional on the wire so a missing value is reported per
/// field instead of as an unparseable body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepositPayload {
    pub amount: Option<f64>,
    pub months: Option<f64>,
    pub rate: Option<f64>,
}

impl DepositPayload {
    fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Amount => self.amount,
            Field::Months => self.months,
            Field::Rate => self.rate,
        }
    }

    /// Applies the same rules as the client, plus presence.
    pub fn into_request(self) -> Result<DepositRequest, ValidationReport> {
        let mut report = ValidationReport::new();
        for field in Field::ALL {
            match self.value(field) {
                None => report.insert(ValidationError::Required { field }),
                Some(value) => {
                    if let Err(violation) = validate_field(field, NormalizedValue::new(value)) {
                        report.insert(violation);
                    }
                }
            }
        }

        match (self.amount, self.months, self.rate) {
            (Some(amount), Some(months), Some(rate)) if report.is_empty() => {
                DepositRequest::new(amount, months, rate)
            }
            _ => Err(report),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Rounds a non-negative amount to cents, halves away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `POST /api/calculate`
pub async fn calculate_deposit(
    payload: Result<Json<DepositPayload>, JsonRejection>,
) -> Result<Json<DepositResponse>, ApiError> {
    let Json(payload) = payload?;
    debug!(?payload, "Calculation requested");

    let request = payload.into_request().map_err(|report| {
        info!(violations = report.len(), %report, "Calculation rejected");
        ApiError::validation(report)
    })?;

    let response = calculate(&request);
    if !response.is_well_formed() {
        error!(
            amount = request.amount(),
            months = request.months(),
            rate = request.rate(),
            "Calculation produced a non-finite result"
        );
        return Err(ApiError::internal("Calculation failed"));
    }

    Ok(Json(DepositResponse {
        total: round_cents(response.total),
        profit: round_cents(response.profit),
    }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(amount: Option<f64>, months: Option<f64>, rate: Option<f64>) -> DepositPayload {
        DepositPayload {
            amount,
            months,
            rate,
        }
    }

    #[test]
    fn test_complete_payload() {
        let request = payload(Some(100_000.0), Some(12.0), Some(8.5))
            .into_request()
            .unwrap();

        assert_eq!(request.amount(), 100_000.0);
        assert_eq!(request.months(), 12);
        assert_eq!(request.rate(), 8.5);
    }

    #[test]
    fn test_missing_fields_are_required() {
        let report = payload(None, Some(12.0), None).into_request().unwrap_err();

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.get(Field::Amount),
            Some(&ValidationError::Required {
                field: Field::Amount
            })
        );
        assert_eq!(
            report.get(Field::Rate),
            Some(&ValidationError::Required { field: Field::Rate })
        );
    }

    #[test]
    fn test_missing_and_out_of_range_reported_together() {
        let report = payload(None, Some(61.0), Some(-3.0))
            .into_request()
            .unwrap_err();

        assert_eq!(report.len(), 3);
        assert_eq!(
            report.get(Field::Rate),
            Some(&ValidationError::MustBePositive { field: Field::Rate })
        );
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(108_839.090_589), 108_839.09);
        assert_eq!(round_cents(8_839.095_1), 8_839.1);
        assert_eq!(round_cents(1_000.0), 1_000.0);
        assert_eq!(round_cents(0.125), 0.13);
    }
}
