//! # Calculator Module
//!
//! Compound interest with monthly capitalization.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  monthly_rate = rate / 100 / 12                                        │
//! │  total        = amount × (1 + monthly_rate) ^ months                   │
//! │  profit       = total − amount                                         │
//! │                                                                         │
//! │  100 000 at 8.5% for 12 months:                                        │
//! │    monthly_rate = 0.0070833…                                           │
//! │    total        = 108 839.09…                                          │
//! │    profit       =   8 839.09…                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results are returned at full `f64` precision. Rounding to kopecks/cents is
//! a display concern and never happens here.

use crate::types::{DepositRequest, DepositResponse};

/// Months per year used to split the annual rate.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Converts an annual percentage rate into a monthly fraction.
///
/// ## Example
/// ```rust
/// use deposit_core::calculator::monthly_rate;
///
/// assert_eq!(monthly_rate(12.0), 0.01);
/// ```
#[inline]
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR
}

/// Computes the payout of a validated deposit request.
///
/// ## Example
/// ```rust
/// use deposit_core::{calculate, DepositRequest};
///
/// let request = DepositRequest::new(1_000.0, 1.0, 12.0).unwrap();
/// let result = calculate(&request);
///
/// assert!((result.total - 1_010.0).abs() < 1e-9);
/// assert!((result.profit - 10.0).abs() < 1e-9);
/// ```
pub fn calculate(request: &DepositRequest) -> DepositResponse {
    compound(request.amount(), request.months(), request.rate())
}

/// Raw compounding formula without the request invariants.
///
/// `calculate` is the entry point for application code; this exists for the
/// degenerate cases a [`DepositRequest`] cannot express (e.g. zero months,
/// which yields `total = amount` and `profit = 0`).
pub fn compound(amount: f64, months: u32, annual_rate_percent: f64) -> DepositResponse {
    let exponent = i32::try_from(months).unwrap_or(i32::MAX);
    let total = amount * (1.0 + monthly_rate(annual_rate_percent)).powi(exponent);

    DepositResponse {
        total,
        profit: total - amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
