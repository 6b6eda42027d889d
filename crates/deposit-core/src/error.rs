//! # Error Types
//!
//! Domain-specific error types for deposit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  deposit-core (this file)                                              │
//! │  └── ValidationError  - one violated rule on one field                 │
//! │      collected into ValidationReport (validation.rs)                   │
//! │                                                                         │
//! │  deposit-client                                                        │
//! │  ├── ProviderError    - provider call failed                           │
//! │  └── LifecycleError   - submit refused before reaching a provider      │
//! │                                                                         │
//! │  deposit-api                                                           │
//! │  └── ApiError         - what HTTP clients see (serialized)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of each variant is the human-readable message shown
//! next to the offending input.

use thiserror::Error;

use crate::types::Field;

/// A single validation rule violated by one field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The field was missing altogether (provider-side payloads only).
    #[error("{field} is required")]
    Required { field: Field },

    /// Empty, unparseable, zero or negative input.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: Field },

    /// Value under the field's lower bound.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: Field, min: f64 },

    /// Value over the field's upper bound.
    #[error("{field} must be at most {max}")]
    AboveMaximum { field: Field, max: f64 },
}

impl ValidationError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::AboveMaximum { field, .. } => *field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
