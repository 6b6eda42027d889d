//! # Request Lifecycle
//!
//! One state machine per form session.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            submit (valid)                  provider Ok                  │
//! │  ┌──────┐ ───────────────► ┌────────────┐ ──────────► ┌───────────┐    │
//! │  │ Idle │                  │ Submitting │             │ Succeeded │    │
//! │  └──────┘ ◄─── reset ───┐  └────────────┘ ──────────► └───────────┘    │
//! │     │                   │        ▲        provider Err  ┌────────┐     │
//! │     │ submit (invalid)  │        │      ──────────────► │ Failed │     │
//! │     ▼                   │        │                      └────────┘     │
//! │  stays put,             └────────┼──── Succeeded / Failed ──┘          │
//! │  ValidationReport                │                                      │
//! │  returned to caller              └──── submit from Succeeded / Failed   │
//! │                                                                         │
//! │  submit while Submitting → LifecycleError::InFlight (no queueing)      │
//! │  submit future dropped mid-call → Failed (ProviderUnreachable)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine can be driven in one call ([`Lifecycle::submit`]) or in two
//! steps ([`Lifecycle::begin`] + [`Lifecycle::finish`]) when the embedding
//! UI runs the provider call itself.

use deposit_core::{DepositRequest, DepositResponse, RawFormState};
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{ErrorKind, LifecycleError, LifecycleResult, ProviderError};
use crate::provider::CalculationProvider;

// =============================================================================
// Lifecycle State
// =============================================================================

/// The single authoritative status of a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LifecycleState {
    /// Nothing submitted yet, or the last outcome was dismissed.
    #[default]
    Idle,
    /// Waiting for the provider.
    Submitting,
    /// The provider answered with a well-formed response.
    Succeeded { response: DepositResponse },
    /// The provider call failed.
    Failed { kind: ErrorKind, message: String },
}

impl LifecycleState {
    /// True while a provider call is outstanding.
    pub fn is_submitting(&self) -> bool {
        matches!(self, LifecycleState::Submitting)
    }

    /// True for `Succeeded` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LifecycleState::Succeeded { .. } | LifecycleState::Failed { .. }
        )
    }

    /// The stored response, if the last submission succeeded.
    pub fn response(&self) -> Option<&DepositResponse> {
        match self {
            LifecycleState::Succeeded { response } => Some(response),
            _ => None,
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// State machine for one interaction with a calculation provider.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Enters `Submitting`, clearing any previous outcome.
    ///
    /// ## Errors
    /// [`LifecycleError::InFlight`] if a submission is already outstanding.
    pub fn begin(&mut self, request: &DepositRequest) -> LifecycleResult<()> {
        if self.is_submitting() {
            debug!("Submit suppressed: calculation already in flight");
            return Err(LifecycleError::InFlight);
        }

        info!(
            amount = request.amount(),
            months = request.months(),
            rate = request.rate(),
            "Submitting deposit calculation"
        );
        self.state = LifecycleState::Submitting;
        Ok(())
    }

    /// Records the provider outcome and leaves `Submitting`.
    ///
    /// A response with non-finite or negative values is treated as
    /// [`ProviderError::MalformedResponse`].
    ///
    /// ## Errors
    /// [`LifecycleError::NotSubmitting`] if no submission is outstanding.
    pub fn finish(
        &mut self,
        outcome: Result<DepositResponse, ProviderError>,
    ) -> LifecycleResult<&LifecycleState> {
        if !self.is_submitting() {
            warn!("Provider outcome received with no calculation in flight");
            return Err(LifecycleError::NotSubmitting);
        }

        let outcome = outcome.and_then(|response| {
            if response.is_well_formed() {
                Ok(response)
            } else {
                Err(ProviderError::MalformedResponse(format!(
                    "total={} profit={}",
                    response.total, response.profit
                )))
            }
        });

        self.state = match outcome {
            Ok(response) => {
                info!(
                    total = response.total,
                    profit = response.profit,
                    "Deposit calculation succeeded"
                );
                LifecycleState::Succeeded { response }
            }
            Err(error) => {
                warn!(kind = ?error.kind(), %error, "Deposit calculation failed");
                LifecycleState::Failed {
                    kind: error.kind(),
                    message: error.user_message(),
                }
            }
        };
        Ok(&self.state)
    }

    /// Returns a terminal state to `Idle`.
    ///
    /// Has no effect while `Submitting`: an in-flight call always runs to
    /// completion. Returns whether the state changed.
    pub fn reset(&mut self) -> bool {
        if !self.state.is_terminal() {
            return false;
        }
        self.state = LifecycleState::Idle;
        true
    }

    /// Validates the form, calls the provider and records the outcome.
    ///
    /// ## Flow
    /// ```text
    /// submit(provider, form)
    ///   │
    ///   ├── already Submitting?      → Err(InFlight), state unchanged
    ///   ├── normalize + validate
    ///   │     └── violations?        → Err(Invalid(report)), state unchanged
    ///   ├── Submitting
    ///   ├── provider.calculate().await
    ///   │     └── future dropped?    → Failed, never left in Submitting
    ///   └── Succeeded | Failed       → Ok(&state)
    /// ```
    pub async fn submit<P>(
        &mut self,
        provider: &P,
        form: &RawFormState,
    ) -> LifecycleResult<&LifecycleState>
    where
        P: CalculationProvider + ?Sized,
    {
        if self.is_submitting() {
            return Err(LifecycleError::InFlight);
        }

        let request = DepositRequest::from_form(form).map_err(|report| {
            debug!(violations = report.len(), "Submit rejected by local validation");
            LifecycleError::Invalid(report)
        })?;

        self.begin(&request)?;
        let guard = SubmitGuard::new(&mut self.state);
        let outcome = provider.calculate(&request).await;
        guard.disarm();
        self.finish(outcome)
    }
}

/// Settles a `Submitting` state as `Failed` if the submit future is dropped
/// before the provider answers.
struct SubmitGuard<'a> {
    state: &'a mut LifecycleState,
    armed: bool,
}

impl<'a> SubmitGuard<'a> {
    fn new(state: &'a mut LifecycleState) -> Self {
        SubmitGuard { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.armed || !self.state.is_submitting() {
            return;
        }

        let error = ProviderError::Unreachable("calculation cancelled before completion".into());
        warn!(kind = ?error.kind(), %error, "Deposit calculation abandoned");
        *self.state = LifecycleState::Failed {
            kind: error.kind(),
            message: error.user_message(),
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use deposit_core::{calculate, Field};

    use super::*;
    use crate::error::CONNECTIVITY_MESSAGE;
    use crate::provider::LocalProvider;

    /// Provider returning a canned outcome and counting calls.
    struct StubProvider {
        outcome: Result<DepositResponse, ProviderError>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(outcome: Result<DepositResponse, ProviderError>) -> Self {
            StubProvider {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CalculationProvider for StubProvider {
        async fn calculate(
            &self,
            _request: &DepositRequest,
        ) -> Result<DepositResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    /// Provider that never answers.
    struct HangingProvider;

    #[async_trait]
    impl CalculationProvider for HangingProvider {
        async fn calculate(
            &self,
            _request: &DepositRequest,
        ) -> Result<DepositResponse, ProviderError> {
            std::future::pending().await
        }
    }

    fn valid_form() -> RawFormState {
        RawFormState::new("100000", "12", "8.5")
    }

    fn valid_request() -> DepositRequest {
        DepositRequest::from_form(&valid_form()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_submit_succeeds() {
        let mut lifecycle = Lifecycle::new();

        let state = lifecycle.submit(&LocalProvider, &valid_form()).await.unwrap();

        let expected = calculate(&valid_request());
        assert_eq!(state, &LifecycleState::Succeeded { response: expected });
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_provider() {
        let provider = StubProvider::new(Ok(DepositResponse {
            total: 1.0,
            profit: 0.0,
        }));
        let mut lifecycle = Lifecycle::new();

        let err = lifecycle
            .submit(&provider, &RawFormState::new("0", "12", "8.5"))
            .await
            .unwrap_err();

        let report = err.report().unwrap();
        assert!(report.get(Field::Amount).is_some());
        assert_eq!(lifecycle.state(), &LifecycleState::Idle);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_previous_outcome() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.submit(&LocalProvider, &valid_form()).await.unwrap();

        let result = lifecycle
            .submit(&LocalProvider, &RawFormState::new("100000", "72", "8.5"))
            .await;

        assert!(matches!(result, Err(LifecycleError::Invalid(_))));
        assert!(lifecycle.state().response().is_some());
    }

    #[tokio::test]
    async fn test_provider_failures_map_to_failed() {
        let cases = [
            (
                ProviderError::Unreachable("connection refused".into()),
                ErrorKind::ProviderUnreachable,
            ),
            (
                ProviderError::ValidationRejected(Some("rate must be at most 20".into())),
                ErrorKind::ProviderValidationRejected,
            ),
            (
                ProviderError::MalformedResponse("expected value at line 1".into()),
                ErrorKind::ProviderMalformedResponse,
            ),
        ];

        for (error, expected_kind) in cases {
            let provider = StubProvider::new(Err(error.clone()));
            let mut lifecycle = Lifecycle::new();

            let state = lifecycle.submit(&provider, &valid_form()).await.unwrap();

            assert_eq!(
                state,
                &LifecycleState::Failed {
                    kind: expected_kind,
                    message: error.user_message(),
                }
            );
            assert_eq!(provider.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_non_finite_response_is_malformed() {
        let provider = StubProvider::new(Ok(DepositResponse {
            total: f64::NAN,
            profit: 1.0,
        }));
        let mut lifecycle = Lifecycle::new();

        let state = lifecycle.submit(&provider, &valid_form()).await.unwrap();

        assert!(matches!(
            state,
            LifecycleState::Failed {
                kind: ErrorKind::ProviderMalformedResponse,
                ..
            }
        ));
    }

    #[test]
    fn test_begin_while_submitting_is_suppressed() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.begin(&valid_request()).unwrap();

        assert_eq!(
            lifecycle.begin(&valid_request()),
            Err(LifecycleError::InFlight)
        );
        assert!(lifecycle.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_while_submitting_is_suppressed() {
        let provider = StubProvider::new(Err(ProviderError::Unreachable("down".into())));
        let mut lifecycle = Lifecycle::new();
        lifecycle.begin(&valid_request()).unwrap();

        let result = lifecycle.submit(&provider, &valid_form()).await;

        assert_eq!(result, Err(LifecycleError::InFlight));
        assert_eq!(provider.calls(), 0);
        assert!(lifecycle.is_submitting());
    }

    #[test]
    fn test_exactly_one_terminal_state() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.begin(&valid_request()).unwrap();

        let state = lifecycle
            .finish(Err(ProviderError::Unreachable("reset by peer".into())))
            .unwrap();
        assert_eq!(
            state,
            &LifecycleState::Failed {
                kind: ErrorKind::ProviderUnreachable,
                message: CONNECTIVITY_MESSAGE.to_string(),
            }
        );

        // A late second outcome cannot overwrite the first.
        let late = lifecycle.finish(Ok(calculate(&valid_request())));
        assert_eq!(late, Err(LifecycleError::NotSubmitting));
        assert!(matches!(lifecycle.state(), LifecycleState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_resubmit_from_failed_clears_previous_state() {
        let failing = StubProvider::new(Err(ProviderError::Unreachable("down".into())));
        let mut lifecycle = Lifecycle::new();
        lifecycle.submit(&failing, &valid_form()).await.unwrap();
        assert!(matches!(lifecycle.state(), LifecycleState::Failed { .. }));

        let state = lifecycle.submit(&LocalProvider, &valid_form()).await.unwrap();
        assert!(matches!(state, LifecycleState::Succeeded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submit_settles_as_failed() {
        let mut lifecycle = Lifecycle::new();

        let result = tokio::time::timeout(
            Duration::from_secs(1),
            lifecycle.submit(&HangingProvider, &valid_form()),
        )
        .await;
        assert!(result.is_err());

        assert_eq!(
            lifecycle.state(),
            &LifecycleState::Failed {
                kind: ErrorKind::ProviderUnreachable,
                message: CONNECTIVITY_MESSAGE.to_string(),
            }
        );

        let state = lifecycle.submit(&LocalProvider, &valid_form()).await.unwrap();
        assert!(state.response().is_some());

        assert!(lifecycle.reset());
        assert_eq!(lifecycle.state(), &LifecycleState::Idle);
    }

    #[test]
    fn test_reset() {
        let mut lifecycle = Lifecycle::new();
        assert!(!lifecycle.reset());

        lifecycle.begin(&valid_request()).unwrap();
        assert!(!lifecycle.reset());
        assert!(lifecycle.is_submitting());

        lifecycle.finish(Ok(calculate(&valid_request()))).unwrap();
        assert!(lifecycle.reset());
        assert_eq!(lifecycle.state(), &LifecycleState::Idle);
    }

    #[test]
    fn test_state_serialization() {
        let state = LifecycleState::Failed {
            kind: ErrorKind::ProviderUnreachable,
            message: "offline".into(),
        };
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "PROVIDER_UNREACHABLE");
        assert_eq!(json["message"], "offline");

        let json = serde_json::to_value(LifecycleState::Idle).unwrap();
        assert_eq!(json["status"], "idle");
    }
}
