//! Axum HTTP API server for YouTube lookups.
//!
//! This crate provides:
//! - URL classification, video details, captions, playlists, MP3 and
//!   direct download endpoints
//! - A bounded lookup history with optional file persistence
//! - Rate limiting and security headers
//! - Prometheus metrics

pub mod api_key;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod services;
pub mod state;

pub use api_key::RequestApiKey;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use query::ApiQuery;
pub use routes::create_router;
pub use services::HistoryService;
pub use state::{AppState, Sources};
