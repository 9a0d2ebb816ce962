//! API Module
//!
//! HTTP handlers and routing for the translation server REST API.
//!
//! # Endpoints
//! - `POST /api/translate` - Translate text, served from cache when possible
//! - `GET /api/stats` - Cache and usage statistics for the caller
//! - `GET /api/cache/search` - Substring search over cached translations
//! - `DELETE /api/cache` - Evict cache entries older than a threshold
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
