//! Response DTOs for the translation server API
//!
//! Defines the structure of outgoing HTTP response bodies. Error bodies
//! are produced by the error type's IntoResponse implementation.

use serde::Serialize;

use crate::cache::CacheEntry;
use crate::provider::Translation;
use crate::stats::StatsReport;

/// Response body for POST /api/translate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub success: bool,
    pub translated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    pub target_language: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    /// Whether the translation was served from the cache
    pub cached: bool,
}

impl TranslateResponse {
    /// Builds a response from a cache hit.
    pub fn from_cache(entry: CacheEntry) -> Self {
        Self {
            success: true,
            translated_text: entry.translated_text,
            source_language: Some(entry.source_language),
            target_language: entry.target_language,
            provider: entry.provider,
            model: entry.model,
            tokens_used: entry.tokens_used,
            cost: entry.cost,
            cached: true,
        }
    }

    /// Builds a response from a fresh provider translation.
    pub fn from_provider(
        translation: Translation,
        source_language: String,
        target_language: String,
        provider: String,
        model: String,
    ) -> Self {
        Self {
            success: true,
            translated_text: translation.translated_text,
            source_language: Some(source_language),
            target_language,
            provider,
            model: Some(model),
            tokens_used: Some(translation.tokens_used),
            cost: Some(translation.cost),
            cached: false,
        }
    }
}

/// Response body for GET /api/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatsData,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    #[serde(flatten)]
    pub report: StatsReport,
    pub timestamp: String,
}

impl StatsResponse {
    /// Wraps a stats report with the current timestamp.
    pub fn new(report: StatsReport) -> Self {
        Self {
            success: true,
            data: StatsData {
                report,
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        }
    }
}

/// Response body for GET /api/cache/search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub count: usize,
    pub results: Vec<CacheEntry>,
}

impl SearchResponse {
    pub fn new(results: Vec<CacheEntry>) -> Self {
        Self {
            success: true,
            count: results.len(),
            results,
        }
    }
}

/// Response body for DELETE /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct EvictResponse {
    pub success: bool,
    /// Number of cache entries removed
    pub evicted: u64,
}

impl EvictResponse {
    pub fn new(evicted: u64) -> Self {
        Self {
            success: true,
            evicted,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
