//! # Deposit API
//!
//! HTTP calculation provider for the deposit calculator front end.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Deposit API Routes                              │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────────────┐│
//! │  │  POST /api/calculate     │  │  GET /health                         ││
//! │  │                          │  │                                      ││
//! │  │ • presence + range check │  │ • {"status": "ok"}                   ││
//! │  │ • monthly compounding    │  │                                      ││
//! │  │ • cents rounding         │  │                                      ││
//! │  └──────────────────────────┘  └──────────────────────────────────────┘│
//! │                                                                         │
//! │  Layers: CORS (configured origin) • HTTP tracing                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `DEPOSIT_API_HOST` - Interface to bind (default: 0.0.0.0)
//! - `DEPOSIT_API_PORT` - HTTP port (default: 8080)
//! - `DEPOSIT_API_ALLOWED_ORIGIN` - CORS origin (default: http://localhost:3000)

pub mod config;
pub mod error;
pub mod handlers;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};

/// Builds the application router.
pub fn router(config: &ApiConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new().route("/calculate", post(handlers::calculate_deposit));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
