//! # Normalize Module
//!
//! Converts raw text typed into the form into finite numbers.
//!
//! ## Normalization Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "1 000 000,50 ₽"                                                       │
//! │       │                                                                 │
//! │       ▼  1. keep only digits, '.' and ','                               │
//! │  "1000000,50"                                                           │
//! │       │                                                                 │
//! │       ▼  2. pick the decimal separator                                  │
//! │          - the LAST separator is the decimal point                      │
//! │          - unless that same character appears more than once,          │
//! │            then every separator is digit grouping                      │
//! │       │                                                                 │
//! │       ▼  3. parse; anything unparseable or non-finite becomes 0        │
//! │  1000000.5                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Input          | Result      |
//! |----------------|-------------|
//! | `8,5`          | 8.5         |
//! | `1.000,50`     | 1000.5      |
//! | `1,000,000`    | 1000000     |
//! | `1,000.25`     | 1000.25     |
//! | `abc` / empty  | 0           |
//!
//! Normalization never fails. Zero is what makes the validator flag an
//! unparseable field.

use crate::types::{Field, RawFormState};

// =============================================================================
// Normalized Value
// =============================================================================

/// A finite number derived from user input. Never NaN, never infinite.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct NormalizedValue(f64);

impl NormalizedValue {
    /// Wraps a number, replacing NaN and infinities with zero.
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            NormalizedValue(value)
        } else {
            NormalizedValue(0.0)
        }
    }

    /// Zero, the value of empty or unparseable input.
    #[inline]
    pub const fn zero() -> Self {
        NormalizedValue(0.0)
    }

    /// Returns the number.
    #[inline]
    pub const fn get(&self) -> f64 {
        self.0
    }
}

impl From<f64> for NormalizedValue {
    fn from(value: f64) -> Self {
        NormalizedValue::new(value)
    }
}

/// All three fields of a form after normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedForm {
    pub amount: NormalizedValue,
    pub months: NormalizedValue,
    pub rate: NormalizedValue,
}

impl NormalizedForm {
    /// Returns the normalized value of a field.
    pub fn get(&self, field: Field) -> NormalizedValue {
        match field {
            Field::Amount => self.amount,
            Field::Months => self.months,
            Field::Rate => self.rate,
        }
    }
}

// =============================================================================
// Normalizer
// =============================================================================

/// Converts raw text into a finite number.
///
/// ## Example
/// ```rust
/// use deposit_core::normalize;
///
/// assert_eq!(normalize("8,5").get(), 8.5);
/// assert_eq!(normalize("100 000").get(), 100_000.0);
/// assert_eq!(normalize("1.000,50").get(), 1_000.5);
/// assert_eq!(normalize("twelve").get(), 0.0);
/// ```
pub fn normalize(text: &str) -> NormalizedValue {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || is_separator(*c))
        .collect();

    parse_cleaned(&cleaned).map_or(NormalizedValue::zero(), NormalizedValue::new)
}

/// Normalizes every field of a raw form.
pub fn normalize_form(form: &RawFormState) -> NormalizedForm {
    NormalizedForm {
        amount: normalize(&form.amount),
        months: normalize(&form.months),
        rate: normalize(&form.rate),
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    c == '.' || c == ','
}

/// Parses a string made only of ASCII digits and separators.
fn parse_cleaned(cleaned: &str) -> Option<f64> {
    let decimal_at = decimal_separator_index(cleaned);

    let mut integer = String::with_capacity(cleaned.len());
    let mut fraction = String::new();
    for (index, c) in cleaned.char_indices() {
        if !c.is_ascii_digit() {
            continue;
        }
        match decimal_at {
            Some(at) if index > at => fraction.push(c),
            _ => integer.push(c),
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let integer = if integer.is_empty() { "0" } else { integer.as_str() };
    let fraction = if fraction.is_empty() { "0" } else { fraction.as_str() };
    format!("{integer}.{fraction}").parse::<f64>().ok()
}

/// Byte index of the decimal separator, or `None` if every separator is
/// digit grouping.
fn decimal_separator_index(cleaned: &str) -> Option<usize> {
    let (index, separator) = cleaned.char_indices().rev().find(|(_, c)| is_separator(*c))?;

    if cleaned.chars().filter(|c| *c == separator).count() > 1 {
        None
    } else {
        Some(index)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
