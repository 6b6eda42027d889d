//! # Validation Module
//!
//! Range rules for the three deposit inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form session (deposit-client)                                │
//! │  ├── Runs on every submit                                              │
//! │  └── Per-field messages shown inline, no request sent                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Calculation provider (deposit-api)                           │
//! │  ├── Same rules, re-applied to the wire payload                        │
//! │  └── Catches client/provider rule skew                                 │
//! │                                                                         │
//! │  Both layers call THIS MODULE.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules (first failing rule per field wins)
//! | Field  | Rule 1 | Rule 2  | Rule 3        |
//! |--------|--------|---------|---------------|
//! | amount | > 0    | ≥ 1000  | ≤ 10 000 000  |
//! | months | > 0    | ≥ 1     | ≤ 60          |
//! | rate   | > 0    | ≥ 1     | ≤ 20          |
//!
//! Fields are checked independently: a bad amount never hides a bad rate.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::ValidationError;
use crate::normalize::{normalize_form, NormalizedValue};
use crate::types::{Field, RawFormState};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validation Report
// =============================================================================

/// Field-level violations of one validation pass.
///
/// A field absent from the report is valid; an empty report is success.
/// Serializes as `{ "amount": "amount must be at least 1000", ... }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, ValidationError>,
}

impl ValidationReport {
    /// Creates an empty (successful) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is in violation.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields in violation.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The violation recorded for a field, if any.
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Human-readable message for a field, if it is in violation.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// Records a violation, replacing any earlier one for the same field.
    pub fn insert(&mut self, error: ValidationError) {
        self.errors.insert(error.field(), error);
    }

    /// Drops the violation of a field (e.g. once the user edits it).
    pub fn clear_field(&mut self, field: Field) -> Option<ValidationError> {
        self.errors.remove(&field)
    }

    /// Iterates violations in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, error) in self.iter() {
            map.serialize_entry(field.as_str(), &error.to_string())?;
        }
        map.end()
    }
}

impl FromIterator<ValidationError> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut report = ValidationReport::new();
        for error in iter {
            report.insert(error);
        }
        report
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Validates one field against its three rules.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User types "500" into amount, presses Calculate                       │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_field(Amount, 500) ← THIS FUNCTION                           │
/// │       │                                                                 │
/// │       ├── 500 <= 0?          no                                        │
/// │       ├── 500 < 1000?        YES → "amount must be at least 1000"      │
/// │       └── (upper bound not evaluated)                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_field(field: Field, value: NormalizedValue) -> ValidationResult<()> {
    let value = value.get();
    let bounds = field.bounds();

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive { field });
    }

    if value < bounds.min {
        return Err(ValidationError::BelowMinimum {
            field,
            min: bounds.min,
        });
    }

    if value > bounds.max {
        return Err(ValidationError::AboveMaximum {
            field,
            max: bounds.max,
        });
    }

    Ok(())
}

/// Validates all three fields independently.
///
/// ## Example
/// ```rust
/// use deposit_core::{normalize, validate, Field};
///
/// let report = validate(normalize("0"), normalize("12"), normalize("25"));
/// assert_eq!(report.len(), 2);
/// assert_eq!(
///     report.message(Field::Amount).as_deref(),
///     Some("amount must be greater than 0")
/// );
/// assert_eq!(
///     report.message(Field::Rate).as_deref(),
///     Some("rate must be at most 20")
/// );
/// ```
pub fn validate(
    amount: NormalizedValue,
    months: NormalizedValue,
    rate: NormalizedValue,
) -> ValidationReport {
    [
        (Field::Amount, amount),
        (Field::Months, months),
        (Field::Rate, rate),
    ]
    .into_iter()
    .filter_map(|(field, value)| validate_field(field, value).err())
    .collect()
}

/// Normalizes then validates a raw form.
pub fn validate_form(form: &RawFormState) -> ValidationReport {
    let normalized = normalize_form(form);
    validate(normalized.amount, normalized.months, normalized.rate)
}

// =============================================================================
// Unit Tests
// =============================================================================
