//! # deposit-core: Pure Business Logic for the Deposit Calculator
//!
//! This crate turns loosely formatted user input into a validated deposit
//! request and computes the compounded payout. Every function here is pure:
//! no I/O, no async, no shared state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Deposit Calculator Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI layer (external)                          │   │
//! │  │    amount / months / rate text fields, result panel            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RawFormState                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             deposit-client (Request Lifecycle)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ deposit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │─►│ validation│─►│ calculator │  │   types   │  │   │
//! │  │   │ text → f64│  │  ranges   │  │ compound   │  │  Request  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (RawFormState, DepositRequest, DepositResponse)
//! - [`normalize`] - Raw text to finite numbers, never fails
//! - [`validation`] - Per-field range rules producing a [`ValidationReport`]
//! - [`calculator`] - Monthly-compounded growth
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use deposit_core::{calculate, DepositRequest, RawFormState};
//!
//! let form = RawFormState::new("100 000", "12", "8,5");
//! let request = DepositRequest::from_form(&form).unwrap();
//!
//! let result = calculate(&request);
//! assert!((result.total - 108_839.09).abs() < 0.01);
//! assert!((result.profit - 8_839.09).abs() < 0.01);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod normalize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::calculate;
pub use error::ValidationError;
pub use normalize::{normalize, normalize_form, NormalizedForm, NormalizedValue};
pub use types::*;
pub use validation::{validate, validate_form, ValidationReport};

// =============================================================================
// Domain Limits
// =============================================================================

/// Smallest accepted principal.
pub const MIN_AMOUNT: f64 = 1_000.0;

/// Largest accepted principal.
pub const MAX_AMOUNT: f64 = 10_000_000.0;

/// Shortest accepted term, in months.
pub const MIN_MONTHS: f64 = 1.0;

/// Longest accepted term, in months (5 years).
pub const MAX_MONTHS: f64 = 60.0;

/// Lowest accepted annual rate, in percent.
pub const MIN_RATE: f64 = 1.0;

/// Highest accepted annual rate, in percent.
pub const MAX_RATE: f64 = 20.0;
