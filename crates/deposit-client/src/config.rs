//! Client configuration.
//!
//! Loaded from environment variables with fallback to defaults:
//! - `DEPOSIT_PROVIDER_TIMEOUT_SECS` - deadline for one provider call
//!   (default: 30, `0` disables the deadline)

use std::env;
use std::time::Duration;

use tracing::debug;

use crate::provider::{CalculationProvider, TimeoutProvider};

/// Default provider deadline in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Client-side configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deadline for a single provider call; `None` waits indefinitely.
    pub provider_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            provider_timeout: Some(Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS)),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = lookup("DEPOSIT_PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_PROVIDER_TIMEOUT_SECS.to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DEPOSIT_PROVIDER_TIMEOUT_SECS".to_string()))?;

        let config = ClientConfig {
            provider_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        };
        debug!(?config, "Client configuration loaded");
        Ok(config)
    }

    /// Wraps a provider according to this configuration.
    pub fn wrap<P>(&self, provider: P) -> Box<dyn CalculationProvider>
    where
        P: CalculationProvider + 'static,
    {
        match self.provider_timeout {
            Some(timeout) => Box::new(TimeoutProvider::new(provider, timeout)),
            None => Box::new(provider),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
