//! Stats Aggregator
//!
//! Read-only rollups over the cache and usage tables: cache-wide totals,
//! per-caller usage in a trailing window, top endpoints, hourly buckets,
//! top target languages and the most recent cache entries. Every
//! aggregation tolerates an empty store and returns zeroed or empty
//! structures.

use serde::Serialize;
use tokio_rusqlite::params;

use crate::db::Db;
use crate::error::{ApiError, Result};

/// Default trailing window for usage aggregation, in hours.
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

/// Default number of top endpoints / languages / recent entries reported.
pub const DEFAULT_TOP_N: u32 = 10;

// == Report Shapes ==
/// Full statistics report, combining cache-wide and per-caller numbers.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub cache: CacheReport,
    pub usage: UsageReport,
}

/// Cache-wide totals, caller-independent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
    pub total_entries: i64,
    pub total_cost: i64,
    pub total_tokens: i64,
    pub top_languages: Vec<LanguageCount>,
    pub recent_translations: Vec<RecentTranslation>,
}

/// One target language with its cache-entry count.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: i64,
}

/// A recently cached translation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTranslation {
    pub text: String,
    pub translated_text: String,
    pub created_at: String,
}

/// Per-caller usage in the trailing window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub last24_hours: WindowTotals,
    pub top_endpoints: Vec<EndpointUsage>,
    pub hourly_usage: Vec<HourlyUsage>,
}

/// Aggregate request totals over the window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowTotals {
    pub total_requests: i64,
    pub total_tokens: i64,
    pub total_cost: i64,
    pub average_response_time: f64,
}

/// One endpoint with its request count and token/cost sums.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointUsage {
    pub endpoint: String,
    pub count: i64,
    pub total_tokens: i64,
    pub total_cost: i64,
}

/// One hour bucket, timestamp truncated to the hour, chronological.
#[derive(Debug, Clone, Serialize)]
pub struct HourlyUsage {
    pub hour: String,
    pub requests: i64,
    pub tokens: i64,
    pub cost: i64,
}

impl Db {
    // == Compute ==
    /// Computes the full statistics report for one caller.
    ///
    /// Cache totals cover the whole store; usage numbers are scoped to
    /// `api_key` within the trailing `window_hours`.
    pub async fn compute_stats(
        &self,
        api_key: &str,
        window_hours: i64,
        top_n: u32,
    ) -> Result<StatsReport> {
        let api_key = api_key.to_string();
        let since = (chrono::Utc::now() - chrono::Duration::hours(window_hours)).to_rfc3339();

        self.conn
            .call(move |conn| -> Result<StatsReport> {
                let (total_entries, total_cost, total_tokens) = conn.query_row(
                    "SELECT COUNT(*), COALESCE(SUM(cost), 0), COALESCE(SUM(tokens_used), 0)
                     FROM translations_cache",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )?;

                let mut stmt = conn.prepare(
                    "SELECT target_language, COUNT(*) AS entries
                     FROM translations_cache
                     GROUP BY target_language
                     ORDER BY entries DESC
                     LIMIT ?1",
                )?;
                let top_languages = stmt
                    .query_map(params![top_n], |row| {
                        Ok(LanguageCount {
                            language: row.get(0)?,
                            count: row.get(1)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let mut stmt = conn.prepare(
                    "SELECT source_text, translated_text, created_at
                     FROM translations_cache
                     ORDER BY datetime(created_at) DESC, id DESC
                     LIMIT ?1",
                )?;
                let recent_translations = stmt
                    .query_map(params![top_n], |row| {
                        Ok(RecentTranslation {
                            text: row.get(0)?,
                            translated_text: row.get(1)?,
                            created_at: row.get(2)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let last24_hours = conn.query_row(
                    "SELECT COUNT(*),
                            COALESCE(SUM(tokens_used), 0),
                            COALESCE(SUM(cost), 0),
                            COALESCE(AVG(response_time), 0.0)
                     FROM api_usage
                     WHERE api_key = ?1 AND datetime(created_at) >= datetime(?2)",
                    params![api_key, since],
                    |row| {
                        Ok(WindowTotals {
                            total_requests: row.get(0)?,
                            total_tokens: row.get(1)?,
                            total_cost: row.get(2)?,
                            average_response_time: row.get(3)?,
                        })
                    },
                )?;

                let mut stmt = conn.prepare(
                    "SELECT endpoint, COUNT(*) AS requests,
                            COALESCE(SUM(tokens_used), 0),
                            COALESCE(SUM(cost), 0)
                     FROM api_usage
                     WHERE api_key = ?1 AND datetime(created_at) >= datetime(?2)
                     GROUP BY endpoint
                     ORDER BY requests DESC
                     LIMIT ?3",
                )?;
                let top_endpoints = stmt
                    .query_map(params![api_key, since, top_n], |row| {
                        Ok(EndpointUsage {
                            endpoint: row.get(0)?,
                            count: row.get(1)?,
                            total_tokens: row.get(2)?,
                            total_cost: row.get(3)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let mut stmt = conn.prepare(
                    "SELECT strftime('%Y-%m-%dT%H:00:00Z', created_at) AS hour,
                            COUNT(*),
                            COALESCE(SUM(tokens_used), 0),
                            COALESCE(SUM(cost), 0)
                     FROM api_usage
                     WHERE api_key = ?1 AND datetime(created_at) >= datetime(?2)
                     GROUP BY hour
                     ORDER BY hour ASC",
                )?;
                let hourly_usage = stmt
                    .query_map(params![api_key, since], |row| {
                        Ok(HourlyUsage {
                            hour: row.get(0)?,
                            requests: row.get(1)?,
                            tokens: row.get(2)?,
                            cost: row.get(3)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(StatsReport {
                    cache: CacheReport {
                        total_entries,
                        total_cost,
                        total_tokens,
                        top_languages,
                        recent_translations,
                    },
                    usage: UsageReport {
                        last24_hours,
                        top_endpoints,
                        hourly_usage,
                    },
                })
            })
            .await
            .map_err(ApiError::from)
    }
}
