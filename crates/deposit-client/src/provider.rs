//! # Calculation Providers
//!
//! The contract the lifecycle calls, plus two in-process implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CalculationProvider (trait)                          │
//! │                                                                         │
//! │  DepositRequest ──► calculate() ──┬──► Ok(DepositResponse)             │
//! │                                   └──► Err(ProviderError)              │
//! │                                          ├── ValidationRejected         │
//! │                                          ├── Unreachable / Timeout      │
//! │                                          └── MalformedResponse          │
//! │                                                                         │
//! │  LocalProvider       - in-process, re-validates then computes          │
//! │  TimeoutProvider<P>  - wraps any provider with a deadline              │
//! │  (remote providers)  - implemented by the embedding application        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use deposit_core::{calculate, DepositRequest, DepositResponse};
use tracing::{debug, warn};

use crate::error::ProviderError;

// =============================================================================
// Provider Trait
// =============================================================================

/// Anything that can turn a validated request into a deposit response.
///
/// Implementations must keep the two failure families apart: a request
/// the provider considers invalid is [`ProviderError::ValidationRejected`];
/// everything about reaching the provider is
/// [`ProviderError::Unreachable`] or [`ProviderError::Timeout`].
#[async_trait]
pub trait CalculationProvider: Send + Sync {
    async fn calculate(&self, request: &DepositRequest) -> Result<DepositResponse, ProviderError>;
}

// =============================================================================
// Local Provider
// =============================================================================

/// In-process provider backed directly by `deposit-core`.
///
/// Re-applies the validation rules before computing, like a remote provider
/// would.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

#[async_trait]
impl CalculationProvider for LocalProvider {
    async fn calculate(&self, request: &DepositRequest) -> Result<DepositResponse, ProviderError> {
        let request = DepositRequest::new(
            request.amount(),
            f64::from(request.months()),
            request.rate(),
        )
        .map_err(|report| ProviderError::ValidationRejected(Some(report.to_string())))?;

        let response = calculate(&request);
        debug!(
            amount = request.amount(),
            months = request.months(),
            rate = request.rate(),
            total = response.total,
            "Local calculation complete"
        );
        Ok(response)
    }
}

// =============================================================================
// Timeout Provider
// =============================================================================

/// Wraps a provider so a slow answer becomes [`ProviderError::Timeout`].
#[derive(Debug, Clone)]
pub struct TimeoutProvider<P> {
    inner: P,
    timeout: Duration,
}

impl<P> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        TimeoutProvider { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl<P: CalculationProvider> CalculationProvider for TimeoutProvider<P> {
    async fn calculate(&self, request: &DepositRequest) -> Result<DepositResponse, ProviderError> {
        match tokio::time::timeout(self.timeout, self.inner.calculate(request)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(timeout = ?self.timeout, "Calculation provider timed out");
                Err(ProviderError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowProvider(Duration);

    #[async_trait]
    impl CalculationProvider for SlowProvider {
        async fn calculate(
            &self,
            request: &DepositRequest,
        ) -> Result<DepositResponse, ProviderError> {
            tokio::time::sleep(self.0).await;
            Ok(calculate(request))
        }
    }

    fn request() -> DepositRequest {
        DepositRequest::new(100_000.0, 12.0, 8.5).unwrap()
    }

    #[tokio::test]
    async fn test_local_provider_matches_core() {
        let response = LocalProvider.calculate(&request()).await.unwrap();
        assert_eq!(response, calculate(&request()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_provider_times_out() {
        let provider = TimeoutProvider::new(
            SlowProvider(Duration::from_secs(60)),
            Duration::from_secs(5),
        );

        let err = provider.calculate(&request()).await.unwrap_err();
        assert_eq!(err, ProviderError::Timeout(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_provider_passes_through() {
        let provider = TimeoutProvider::new(
            SlowProvider(Duration::from_millis(10)),
            Duration::from_secs(5),
        );

        let response = provider.calculate(&request()).await.unwrap();
        assert_eq!(response, calculate(&request()));
        assert_eq!(provider.timeout(), Duration::from_secs(5));
    }
}
