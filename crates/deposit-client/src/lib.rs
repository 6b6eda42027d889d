//! # deposit-client: Request Lifecycle for the Deposit Calculator
//!
//! Owns everything between a keystroke and a rendered result: the form
//! session, the submission state machine and the provider contract.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Submission Flow                                 │
//! │                                                                         │
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────────────────┐  │
//! │  │ DepositForm  │───►│  Lifecycle   │───►│ dyn CalculationProvider  │  │
//! │  │              │    │              │    │                          │  │
//! │  │ raw text     │    │ Idle         │    │ LocalProvider            │  │
//! │  │ field errors │    │ Submitting   │    │ TimeoutProvider<P>       │  │
//! │  │              │    │ Succeeded    │    │ (embedder's transport)   │  │
//! │  │              │    │ Failed       │    │                          │  │
//! │  └──────┬───────┘    └──────────────┘    └──────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   deposit-core: normalize → validate → DepositRequest                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`form`] - Form session reducer (sanitizing edits, inline errors)
//! - [`lifecycle`] - Idle / Submitting / Succeeded / Failed state machine
//! - [`provider`] - `CalculationProvider` trait and in-process providers
//! - [`config`] - Provider deadline from the environment
//! - [`error`] - Provider and lifecycle errors
//!
//! ## Example Usage
//!
//! ```rust
//! use deposit_client::{DepositForm, LocalProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut form = DepositForm::default();
//! let state = form.submit(&LocalProvider).await.unwrap();
//!
//! let response = state.response().unwrap();
//! assert!((response.profit - 8_839.09).abs() < 0.01);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod provider;

pub use config::{ClientConfig, ConfigError};
pub use error::{ErrorKind, LifecycleError, LifecycleResult, ProviderError};
pub use form::{DepositForm, FormAction};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use provider::{CalculationProvider, LocalProvider, TimeoutProvider};
