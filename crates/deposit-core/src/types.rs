//! # Domain Types
//!
//! Core domain types used throughout the deposit calculator.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  RawFormState   │   │ DepositRequest  │   │ DepositResponse │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  amount: text   │──►│  amount: f64    │──►│  total: f64     │       │
//! │  │  months: text   │   │  months: u32    │   │  profit: f64    │       │
//! │  │  rate: text     │   │  rate: f64      │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │     as typed              validated only         full precision        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::normalize::normalize_form;
use crate::validation::{validate, ValidationReport};
use crate::{MAX_AMOUNT, MAX_MONTHS, MAX_RATE, MIN_AMOUNT, MIN_MONTHS, MIN_RATE};

// =============================================================================
// Field
// =============================================================================

/// One of the three user-editable inputs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Deposit principal.
    Amount,
    /// Term in months.
    Months,
    /// Annual interest rate in percent.
    Rate,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 3] = [Field::Amount, Field::Months, Field::Rate];

    /// Wire/field name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Months => "months",
            Field::Rate => "rate",
        }
    }

    /// Inclusive accepted range for this field.
    pub const fn bounds(&self) -> FieldBounds {
        match self {
            Field::Amount => FieldBounds::new(MIN_AMOUNT, MAX_AMOUNT),
            Field::Months => FieldBounds::new(MIN_MONTHS, MAX_MONTHS),
            Field::Rate => FieldBounds::new(MIN_RATE, MAX_RATE),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `[min, max]` range of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
}

impl FieldBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        FieldBounds { min, max }
    }

    /// Checks whether `value` lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// =============================================================================
// Raw Form State
// =============================================================================

/// The three input fields exactly as typed by the user.
///
/// No numeric guarantees: every field is opaque text until it goes through
/// [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawFormState {
    pub amount: String,
    pub months: String,
    pub rate: String,
}

impl RawFormState {
    /// Creates a form state from the three raw texts.
    pub fn new(
        amount: impl Into<String>,
        months: impl Into<String>,
        rate: impl Into<String>,
    ) -> Self {
        RawFormState {
            amount: amount.into(),
            months: months.into(),
            rate: rate.into(),
        }
    }

    /// Returns the raw text of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.amount,
            Field::Months => &self.months,
            Field::Rate => &self.rate,
        }
    }

    /// Replaces the raw text of a field.
    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        let slot = match field {
            Field::Amount => &mut self.amount,
            Field::Months => &mut self.months,
            Field::Rate => &mut self.rate,
        };
        *slot = text.into();
    }
}

// =============================================================================
// Deposit Request
// =============================================================================

/// A validated calculation request.
///
/// ## Invariants
/// - `amount` ∈ [1 000, 10 000 000]
/// - `months` ∈ [1, 60], a whole count
/// - `rate` ∈ [1, 20], annual percent
///
/// Fields are private: the only way to obtain a `DepositRequest` is through
/// validation, so holding one proves the invariants hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DepositRequest {
    amount: f64,
    months: u32,
    rate: f64,
}

impl DepositRequest {
    /// Validates the three numbers and builds a request.
    ///
    /// A fractional month count that passes the range rules is truncated to
    /// whole months.
    ///
    /// ## Example
    /// ```rust
    /// use deposit_core::{DepositRequest, Field};
    ///
    /// let request = DepositRequest::new(50_000.0, 24.0, 7.25).unwrap();
    /// assert_eq!(request.months(), 24);
    ///
    /// let report = DepositRequest::new(500.0, 24.0, 7.25).unwrap_err();
    /// assert!(report.get(Field::Amount).is_some());
    /// ```
    pub fn new(amount: f64, months: f64, rate: f64) -> Result<Self, ValidationReport> {
        let report = validate(amount.into(), months.into(), rate.into());
        if !report.is_empty() {
            return Err(report);
        }

        Ok(DepositRequest {
            amount,
            months: months.trunc() as u32,
            rate,
        })
    }

    /// Normalizes and validates raw form input in one step.
    pub fn from_form(form: &RawFormState) -> Result<Self, ValidationReport> {
        let normalized = normalize_form(form);
        DepositRequest::new(
            normalized.amount.get(),
            normalized.months.get(),
            normalized.rate.get(),
        )
    }

    /// Principal.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Term in whole months.
    #[inline]
    pub fn months(&self) -> u32 {
        self.months
    }

    /// Annual rate in percent.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

// =============================================================================
// Deposit Response
// =============================================================================

/// Result of a deposit calculation.
///
/// Values are full precision. Rounding for display is the presentation
/// layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DepositResponse {
    /// Payout at the end of the term (principal + interest).
    pub total: f64,
    /// Interest earned over the term.
    pub profit: f64,
}

impl DepositResponse {
    /// Checks that both values are finite and non-negative.
    ///
    /// Anything else cannot have come from a valid calculation.
    pub fn is_well_formed(&self) -> bool {
        self.total.is_finite() && self.profit.is_finite() && self.total >= 0.0 && self.profit >= 0.0
    }

    /// Profit as a percentage of the principal.
    ///
    /// ## Example
    /// ```rust
    /// use deposit_core::DepositResponse;
    ///
    /// let response = DepositResponse { total: 1_100.0, profit: 100.0 };
    /// assert_eq!(response.profit_percent(1_000.0), 10.0);
    /// assert_eq!(response.profit_percent(0.0), 0.0);
    /// ```
    pub fn profit_percent(&self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        self.profit / amount * 100.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(Field::Amount.to_string(), "amount");
        assert_eq!(Field::Months.as_str(), "months");
        assert_eq!(serde_json::to_string(&Field::Rate).unwrap(), "\"rate\"");
    }

    #[test]
    fn test_field_bounds() {
        assert!(Field::Amount.bounds().contains(1_000.0));
        assert!(Field::Amount.bounds().contains(10_000_000.0));
        assert!(!Field::Amount.bounds().contains(999.99));
        assert!(!Field::Months.bounds().contains(61.0));
        assert!(Field::Rate.bounds().contains(20.0));
    }

    #[test]
    fn test_raw_form_get_set() {
        let mut form = RawFormState::new("1000", "12", "8.5");
        assert_eq!(form.get(Field::Months), "12");

        form.set(Field::Months, "24");
        assert_eq!(form.months, "24");
        assert_eq!(form.get(Field::Amount), "1000");
    }

    #[test]
    fn test_request_from_form() {
        let form = RawFormState::new("1 000 000", "36", "10,75");
        let request = DepositRequest::from_form(&form).unwrap();

        assert_eq!(request.amount(), 1_000_000.0);
        assert_eq!(request.months(), 36);
        assert_eq!(request.rate(), 10.75);
    }

    #[test]
    fn test_request_rejects_invalid_form() {
        let form = RawFormState::new("", "61", "8.5");
        let report = DepositRequest::from_form(&form).unwrap_err();

        assert!(report.get(Field::Amount).is_some());
        assert!(report.get(Field::Months).is_some());
        assert!(report.get(Field::Rate).is_none());
    }

    #[test]
    fn test_request_truncates_fractional_months() {
        let request = DepositRequest::new(10_000.0, 12.9, 5.0).unwrap();
        assert_eq!(request.months(), 12);

        let request = DepositRequest::new(10_000.0, 60.0, 5.0).unwrap();
        assert_eq!(request.months(), 60);
    }

    #[test]
    fn test_request_serializes_as_numbers() {
        let request = DepositRequest::new(100_000.0, 12.0, 8.5).unwrap();
        let json = serde_json::to_value(request).unwrap();

        assert_eq!(json["amount"], 100_000.0);
        assert_eq!(json["months"], 12);
        assert_eq!(json["rate"], 8.5);
    }

    #[test]
    fn test_response_well_formed() {
        assert!(DepositResponse { total: 1_010.0, profit: 10.0 }.is_well_formed());
        assert!(!DepositResponse { total: f64::NAN, profit: 10.0 }.is_well_formed());
        assert!(!DepositResponse { total: 1_010.0, profit: f64::INFINITY }.is_well_formed());
        assert!(!DepositResponse { total: -1.0, profit: 0.0 }.is_well_formed());
    }

    #[test]
    fn test_response_deserializes() {
        let response: DepositResponse =
            serde_json::from_str(r#"{"total":108839.09,"profit":8839.09}"#).unwrap();
        assert_eq!(response.total, 108_839.09);
        assert_eq!(response.profit, 8_839.09);
    }
}
