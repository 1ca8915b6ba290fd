//! Axum HTTP API for comment sentiment analysis.
//!
//! This crate provides:
//! - `POST /api/analyze` running the comment pipeline for one video
//! - Liveness, readiness and Prometheus metrics endpoints
//! - Per-IP rate limiting and security headers

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
