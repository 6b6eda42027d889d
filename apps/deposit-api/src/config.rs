//! Deposit API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Origin of the browser UI in development.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Deposit API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// HTTP server port
    pub port: u16,

    /// Origin allowed by CORS
    pub allowed_origin: HeaderValue,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let host = match lookup("DEPOSIT_API_HOST") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEPOSIT_API_HOST".to_string()))?,
            None => defaults.host,
        };

        let port = match lookup("DEPOSIT_API_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEPOSIT_API_PORT".to_string()))?,
            None => defaults.port,
        };

        let allowed_origin = match lookup("DEPOSIT_API_ALLOWED_ORIGIN") {
            Some(value) => HeaderValue::from_str(value.trim()).map_err(|_| {
                ConfigError::InvalidValue("DEPOSIT_API_ALLOWED_ORIGIN".to_string())
            })?,
            None => defaults.allowed_origin,
        };

        Ok(ApiConfig {
            host,
            port,
            allowed_origin,
        })
    }

    /// Socket address the server binds to.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.allowed_origin, "http://localhost:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("DEPOSIT_API_HOST", "127.0.0.1"),
            ("DEPOSIT_API_PORT", "9090"),
            ("DEPOSIT_API_ALLOWED_ORIGIN", "https://deposits.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
        assert_eq!(config.allowed_origin, "https://deposits.example.com");
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[("DEPOSIT_API_PORT", "80000")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for DEPOSIT_API_PORT");

        let err = ApiConfig::from_lookup(lookup(&[("DEPOSIT_API_HOST", "localhost")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for DEPOSIT_API_HOST");

        let err = ApiConfig::from_lookup(lookup(&[("DEPOSIT_API_ALLOWED_ORIGIN", "bad\norigin")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for DEPOSIT_API_ALLOWED_ORIGIN");
    }
}
