//! # Form Session
//!
//! The UI-facing state container: raw field text, inline field errors and
//! the lifecycle state, updated only through explicit transitions.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form Session Operations                              │
//! │                                                                         │
//! │  UI Event              Transition               State Change            │
//! │  ────────              ──────────               ────────────            │
//! │                                                                         │
//! │  Keystroke ──────────► Edit { field, text } ──► raw[field] = sanitized │
//! │                                                 errors[field] cleared   │
//! │                                                 Failed → Idle           │
//! │                                                                         │
//! │  Calculate button ───► submit(provider) ──────► errors = report         │
//! │                                                 lifecycle advances      │
//! │                                                                         │
//! │  Dismiss result ─────► Dismiss ───────────────► terminal → Idle         │
//! │                                                                         │
//! │  Clear form ─────────► Reset ─────────────────► defaults restored       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use deposit_core::{
    normalize, DepositRequest, DepositResponse, Field, RawFormState, ValidationReport,
};
use tracing::debug;

use crate::error::{LifecycleResult, ProviderError};
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::provider::CalculationProvider;

/// Prefilled principal.
pub const DEFAULT_AMOUNT: &str = "100000";

/// Prefilled term in months.
pub const DEFAULT_MONTHS: &str = "12";

/// Prefilled annual rate.
pub const DEFAULT_RATE: &str = "8.5";

/// Keeps only the characters the normalizer understands.
///
/// ## Example
/// ```rust
/// use deposit_client::form::sanitize_input;
///
/// assert_eq!(sanitize_input("1 000 000 ₽"), "1000000");
/// assert_eq!(sanitize_input("8,5 %"), "8,5");
/// ```
pub fn sanitize_input(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect()
}

/// Synchronous transitions of a form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// The user changed a field.
    Edit { field: Field, text: String },
    /// The user dismissed the last result or error.
    Dismiss,
    /// Restore the default values and drop every error.
    Reset,
}

/// One form session.
#[derive(Debug, Clone)]
pub struct DepositForm {
    raw: RawFormState,
    errors: ValidationReport,
    lifecycle: Lifecycle,
}

impl Default for DepositForm {
    fn default() -> Self {
        DepositForm::new(RawFormState::new(
            DEFAULT_AMOUNT,
            DEFAULT_MONTHS,
            DEFAULT_RATE,
        ))
    }
}

impl DepositForm {
    /// Starts a session with the given field values.
    pub fn new(raw: RawFormState) -> Self {
        DepositForm {
            raw,
            errors: ValidationReport::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Field text as stored (after sanitizing).
    pub fn raw(&self) -> &RawFormState {
        &self.raw
    }

    /// Inline field errors from the last submit.
    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    /// Overall submission status.
    pub fn state(&self) -> &LifecycleState {
        self.lifecycle.state()
    }

    /// Applies a synchronous transition.
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Edit { field, text } => self.edit(field, &text),
            FormAction::Dismiss => {
                self.lifecycle.reset();
            }
            FormAction::Reset => {
                if self.lifecycle.is_submitting() {
                    debug!("Reset ignored while a calculation is in flight");
                    return;
                }
                *self = DepositForm::default();
            }
        }
    }

    /// Stores a keystroke.
    ///
    /// Clears the edited field's error and turns a `Failed` state back into
    /// `Idle`; a successful result stays on screen until the next submit.
    pub fn edit(&mut self, field: Field, text: &str) {
        self.raw.set(field, sanitize_input(text));
        self.errors.clear_field(field);

        if matches!(self.lifecycle.state(), LifecycleState::Failed { .. }) {
            self.lifecycle.reset();
        }
    }

    /// Runs a full submission against `provider`.
    ///
    /// On local validation failure the report is stored for inline display
    /// and returned as [`crate::LifecycleError::Invalid`].
    pub async fn submit<P>(&mut self, provider: &P) -> LifecycleResult<&LifecycleState>
    where
        P: CalculationProvider + ?Sized,
    {
        let outcome = self.lifecycle.submit(provider, &self.raw).await;
        match &outcome {
            Ok(_) => self.errors = ValidationReport::new(),
            Err(error) => {
                if let Some(report) = error.report() {
                    self.errors = report.clone();
                }
            }
        }
        outcome
    }

    /// First half of a two-step submission.
    ///
    /// Validates, enters `Submitting` and hands back the request for the
    /// caller to send. Pair with [`DepositForm::finish_submit`].
    pub fn begin_submit(&mut self) -> LifecycleResult<DepositRequest> {
        if self.lifecycle.is_submitting() {
            return Err(crate::LifecycleError::InFlight);
        }

        let request = DepositRequest::from_form(&self.raw).map_err(|report| {
            self.errors = report.clone();
            crate::LifecycleError::Invalid(report)
        })?;

        self.errors = ValidationReport::new();
        self.lifecycle.begin(&request)?;
        Ok(request)
    }

    /// Second half of a two-step submission.
    pub fn finish_submit(
        &mut self,
        outcome: Result<DepositResponse, ProviderError>,
    ) -> LifecycleResult<&LifecycleState> {
        self.lifecycle.finish(outcome)
    }

    /// Profit as a percentage of the entered principal, once a result is in.
    pub fn profit_percent(&self) -> Option<f64> {
        let amount = normalize(&self.raw.amount).get();
        self.state()
            .response()
            .map(|response| response.profit_percent(amount))
    }
}
