//! Usage Recorder
//!
//! Appends one row to `api_usage` per external-facing API invocation.
//! Recording is best-effort telemetry: callers log and swallow failures
//! rather than failing the user-visible response.

use tokio_rusqlite::params;

use crate::db::Db;
use crate::error::{ApiError, Result};

// == New Usage Record ==
/// Fields for one usage row. Rows are never mutated or deleted by the
/// server; retention is an external concern.
#[derive(Debug, Clone, Default)]
pub struct NewUsageRecord {
    /// Caller API key, when presented
    pub api_key: Option<String>,
    /// Resolved user id, when known
    pub user_id: Option<i64>,
    /// Endpoint path that was invoked
    pub endpoint: String,
    /// HTTP method
    pub method: String,
    /// Response status code
    pub status_code: u16,
    /// Request handling time in milliseconds
    pub response_time_ms: Option<i64>,
    /// Provider tokens spent on this invocation
    pub tokens_used: Option<i64>,
    /// Provider cost in cents for this invocation
    pub cost: Option<i64>,
    /// Caller IP address
    pub ip_address: Option<String>,
    /// Caller user agent
    pub user_agent: Option<String>,
}

impl Db {
    // == Record ==
    /// Appends a usage record.
    pub async fn record_usage(&self, record: NewUsageRecord) -> Result<()> {
        let created_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<()> {
                conn.execute(
                    "INSERT INTO api_usage (
                        user_id, api_key, endpoint, method, status_code,
                        response_time, tokens_used, cost, ip_address, user_agent, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    params![
                        record.user_id,
                        record.api_key,
                        record.endpoint,
                        record.method,
                        record.status_code,
                        record.response_time_ms,
                        record.tokens_used,
                        record.cost,
                        record.ip_address,
                        record.user_agent,
                        created_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(ApiError::from)
    }

    /// Number of usage rows for a caller, across all time.
    #[cfg(test)]
    pub(crate) async fn usage_row_count(&self, api_key: &str) -> Result<i64> {
        let api_key = api_key.to_string();
        self.conn
            .call(move |conn| -> Result<i64> {
                let count = conn.query_row(
                    "SELECT COUNT(*) FROM api_usage WHERE api_key = ?1",
                    params![api_key],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await
            .map_err(ApiError::from)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(api_key: &str, status: u16) -> NewUsageRecord {
        NewUsageRecord {
            api_key: Some(api_key.to_string()),
            endpoint: "/api/translate".to_string(),
            method: "POST".to_string(),
            status_code: status,
            response_time_ms: Some(120),
            tokens_used: Some(30),
            cost: Some(2),
            ip_address: Some("203.0.113.7".to_string()),
            user_agent: Some("test-agent".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_record_usage_appends_rows() {
        let db = Db::open_in_memory().await.unwrap();

        db.record_usage(sample_record("key-1", 200)).await.unwrap();
        db.record_usage(sample_record("key-1", 502)).await.unwrap();
        db.record_usage(sample_record("key-2", 200)).await.unwrap();

        assert_eq!(db.usage_row_count("key-1").await.unwrap(), 2);
        assert_eq!(db.usage_row_count("key-2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_record_usage_minimal_fields() {
        let db = Db::open_in_memory().await.unwrap();

        let record = NewUsageRecord {
            endpoint: "/health".to_string(),
            method: "GET".to_string(),
            status_code: 200,
            ..Default::default()
        };
        db.record_usage(record).await.unwrap();
    }
}
