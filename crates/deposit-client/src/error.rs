//! # Client Error Types
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Submission Error Categories                        │
//! │                                                                         │
//! │  ┌──────────────────────┐      ┌──────────────────────────────────────┐ │
//! │  │  Local (no request)  │      │  Provider boundary (→ Failed state)  │ │
//! │  │                      │      │                                      │ │
//! │  │  ValidationRejected  │      │  ProviderValidationRejected          │ │
//! │  │  (per-field report)  │      │  ProviderUnreachable (incl. timeout) │ │
//! │  │                      │      │  ProviderMalformedResponse           │ │
//! │  └──────────────────────┘      └──────────────────────────────────────┘ │
//! │                                                                         │
//! │  Nothing here is fatal: every error ends as inline field messages or   │
//! │  a Failed lifecycle state with a human-readable message.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use deposit_core::ValidationReport;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Generic message for transport-level failures.
pub const CONNECTIVITY_MESSAGE: &str =
    "Calculation failed. Check your connection to the server and try again.";

/// Message used when a provider rejects a request without saying why.
pub const PROVIDER_VALIDATION_MESSAGE: &str = "The server rejected the entered values.";

/// Message shown when the provider's answer cannot be understood.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "The server returned an unexpected response.";

// =============================================================================
// Error Kind
// =============================================================================

/// Machine-readable category of a submission failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Local per-field rule violation; never reaches a provider.
    ///
    /// Reported through [`LifecycleError::kind`], never stored in a
    /// `Failed` state: the lifecycle stays where it was.
    ValidationRejected,
    /// The provider's own validation refused the request.
    ProviderValidationRejected,
    /// No usable answer: network error, provider down, timeout.
    ProviderUnreachable,
    /// An answer arrived but is not a valid deposit response.
    ProviderMalformedResponse,
}

impl ErrorKind {
    /// Returns true if resubmitting the same values may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::ProviderUnreachable)
    }
}

// =============================================================================
// Provider Error
// =============================================================================

/// Failure reported by a calculation provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Provider-side validation refused the request.
    ///
    /// Carries the provider's message when it sent one.
    #[error("Provider rejected the request: {}", .0.as_deref().unwrap_or("no reason given"))]
    ValidationRejected(Option<String>),

    /// Provider could not be reached or failed internally.
    #[error("Provider unreachable: {0}")]
    Unreachable(String),

    /// Provider did not answer in time.
    #[error("Provider timed out after {0:?}")]
    Timeout(Duration),

    /// Answer could not be interpreted as a deposit response.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// The lifecycle category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::ValidationRejected(_) => ErrorKind::ProviderValidationRejected,
            ProviderError::Unreachable(_) | ProviderError::Timeout(_) => {
                ErrorKind::ProviderUnreachable
            }
            ProviderError::MalformedResponse(_) => ErrorKind::ProviderMalformedResponse,
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Transport details stay in the logs; the user gets a generic
    /// connectivity message.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::ValidationRejected(Some(message)) => message.clone(),
            ProviderError::ValidationRejected(None) => PROVIDER_VALIDATION_MESSAGE.to_string(),
            ProviderError::Unreachable(_) | ProviderError::Timeout(_) => {
                CONNECTIVITY_MESSAGE.to_string()
            }
            ProviderError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
        }
    }
}

// =============================================================================
// Lifecycle Error
// =============================================================================

/// A lifecycle operation refused before (or instead of) reaching a provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    /// Local validation failed; the report holds per-field messages.
    #[error("Validation failed: {0}")]
    Invalid(ValidationReport),

    /// A submission is already in flight.
    #[error("A calculation is already in progress")]
    InFlight,

    /// A provider outcome arrived while nothing was being submitted.
    #[error("No calculation is in progress")]
    NotSubmitting,
}

impl LifecycleError {
    /// The category the UI reports for this refusal, if it has one.
    ///
    /// `InFlight` and `NotSubmitting` are protocol misuse, not outcomes.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            LifecycleError::Invalid(_) => Some(ErrorKind::ValidationRejected),
            LifecycleError::InFlight | LifecycleError::NotSubmitting => None,
        }
    }

    /// The per-field report, if this is a validation failure.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            LifecycleError::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

/// Result type alias for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_kinds() {
        assert_eq!(
            ProviderError::ValidationRejected(None).kind(),
            ErrorKind::ProviderValidationRejected
        );
        assert_eq!(
            ProviderError::Unreachable("connection refused".into()).kind(),
            ErrorKind::ProviderUnreachable
        );
        assert_eq!(
            ProviderError::Timeout(Duration::from_secs(30)).kind(),
            ErrorKind::ProviderUnreachable
        );
        assert_eq!(
            ProviderError::MalformedResponse("missing field `total`".into()).kind(),
            ErrorKind::ProviderMalformedResponse
        );
    }

    #[test]
    fn test_user_messages() {
        let err = ProviderError::ValidationRejected(Some("amount must be at least 1000".into()));
        assert_eq!(err.user_message(), "amount must be at least 1000");

        let err = ProviderError::ValidationRejected(None);
        assert_eq!(err.user_message(), PROVIDER_VALIDATION_MESSAGE);

        // Transport detail must not leak into the UI.
        let err = ProviderError::Unreachable("tcp connect error: 10.0.0.7:8080".into());
        assert_eq!(err.user_message(), CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Provider timed out after 5s");

        let err = ProviderError::ValidationRejected(None);
        assert_eq!(err.to_string(), "Provider rejected the request: no reason given");
    }

    #[test]
    fn test_lifecycle_error_kinds() {
        let report: ValidationReport = [deposit_core::ValidationError::MustBePositive {
            field: deposit_core::Field::Amount,
        }]
        .into_iter()
        .collect();

        assert_eq!(
            LifecycleError::Invalid(report).kind(),
            Some(ErrorKind::ValidationRejected)
        );
        assert_eq!(LifecycleError::InFlight.kind(), None);
        assert_eq!(LifecycleError::NotSubmitting.kind(), None);
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ErrorKind::ProviderUnreachable.is_retryable());
        assert!(!ErrorKind::ProviderValidationRejected.is_retryable());
        assert!(!ErrorKind::ProviderMalformedResponse.is_retryable());
        assert!(!ErrorKind::ValidationRejected.is_retryable());
    }

    #[test]
    fn test_error_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::ProviderUnreachable).unwrap(),
            "\"PROVIDER_UNREACHABLE\""
        );
    }
}
