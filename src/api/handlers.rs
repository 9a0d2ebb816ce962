//! API Handlers
//!
//! HTTP request handlers for each translation server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};

use crate::config::Config;
use crate::db::Db;
use crate::error::{ApiError, Result};
use crate::models::{
    EvictParams, EvictResponse, HealthResponse, SearchParams, SearchResponse, StatsResponse,
    TranslateRequest, TranslateResponse,
};
use crate::provider::TranslationProvider;
use crate::stats::{DEFAULT_TOP_N, DEFAULT_WINDOW_HOURS};
use crate::translate::{self, Caller};

/// Hard cap on search result pages.
const MAX_SEARCH_LIMIT: u32 = 100;

/// Application state shared across all handlers.
///
/// Holds the database handle and the injected provider; no state lives in
/// module globals, so tests construct isolated instances freely.
#[derive(Clone)]
pub struct AppState {
    /// Shared database handle (cache, usage, rate limits)
    pub db: Db,
    /// External translation backend
    pub provider: Arc<dyn TranslationProvider>,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(db: Db, provider: Arc<dyn TranslationProvider>, config: Config) -> Self {
        Self {
            db,
            provider,
            config: Arc::new(config),
        }
    }
}

/// Pulls the caller identity out of the request headers.
///
/// The API key is mandatory; IP and user agent are best-effort audit
/// metadata.
fn caller_from_headers(headers: &HeaderMap) -> Result<Caller> {
    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("API key required".to_string()))?
        .to_string();

    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    Ok(Caller {
        api_key,
        ip_address,
        user_agent,
    })
}

/// Handler for POST /api/translate
///
/// Runs the full orchestration: validation, rate limiting, cache lookup,
/// provider call on a miss, cache insert, usage record.
pub async fn translate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    let caller = caller_from_headers(&headers)?;

    let response = translate::handle_translation(
        &state.db,
        state.provider.as_ref(),
        &state.config,
        &caller,
        &request,
    )
    .await?;

    Ok(Json(response))
}

/// Handler for GET /api/stats
///
/// Returns cache-wide totals plus the caller's usage over the trailing
/// 24 hours.
pub async fn stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>> {
    let caller = caller_from_headers(&headers)?;

    let report = state
        .db
        .compute_stats(&caller.api_key, DEFAULT_WINDOW_HOURS, DEFAULT_TOP_N)
        .await?;

    Ok(Json(StatsResponse::new(report)))
}

/// Handler for GET /api/cache/search
///
/// Substring search over source and translated text, newest first.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    if params.q.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "Search query cannot be empty".to_string(),
        ));
    }

    let limit = params
        .limit
        .unwrap_or(DEFAULT_TOP_N)
        .min(MAX_SEARCH_LIMIT)
        .max(1);
    let results = state.db.search_translations(params.q.trim(), limit).await?;

    Ok(Json(SearchResponse::new(results)))
}

/// Handler for DELETE /api/cache
///
/// Evicts entries older than the requested number of days (defaults to
/// the configured retention period). Returns the number of rows removed.
pub async fn evict_handler(
    State(state): State<AppState>,
    Query(params): Query<EvictParams>,
) -> Result<Json<EvictResponse>> {
    let days = params
        .older_than_days
        .unwrap_or(state.config.cache_retention_days);
    let evicted = state.db.evict_older_than(days).await?;

    Ok(Json(EvictResponse::new(evicted)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
