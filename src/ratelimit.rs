//! Fixed-Window Rate Limiter
//!
//! Request counter keyed by (caller identifier, endpoint), persisted in
//! the `rate_limits` table so the quota is enforced correctly across
//! multiple server instances. The limiter is approximate: bursts at
//! window boundaries are possible by design.
//!
//! State machine per key: no row yet creates a window with the current
//! time and a count of 1; within the window the count is incremented and
//! the request rejected once it exceeds the maximum; once the window has
//! elapsed a fresh window replaces it with a count of 1.

use chrono::{DateTime, Utc};
use tokio_rusqlite::{params, rusqlite};

use crate::db::Db;
use crate::error::{ApiError, Result};

impl Db {
    // == Check ==
    /// Counts one request for `(identifier, endpoint)` against the quota.
    ///
    /// Returns `Ok(())` when the request is within the quota and
    /// `RateLimited` with retry-after seconds once the window is
    /// exhausted. Rejected requests still advance the counter.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        endpoint: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> Result<()> {
        let identifier = identifier.to_string();
        let endpoint = endpoint.to_string();
        let now = Utc::now();

        self.conn
            .call(move |conn| -> Result<()> {
                let now_str = now.to_rfc3339();
                let existing = conn
                    .query_row(
                        "SELECT requests, window_start FROM rate_limits
                         WHERE identifier = ?1 AND endpoint = ?2",
                        params![identifier, endpoint],
                        |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)),
                    )
                    .map(Some)
                    .or_else(|e| match e {
                        rusqlite::Error::QueryReturnedNoRows => Ok(None),
                        other => Err(other),
                    })?;

                let window = existing.and_then(|(requests, start)| {
                    // Unparseable window rows reset to a fresh window
                    DateTime::parse_from_rfc3339(&start)
                        .ok()
                        .map(|start| (requests, start.with_timezone(&Utc)))
                });

                match window {
                    Some((requests, window_start))
                        if (now - window_start).num_seconds() < window_secs as i64 =>
                    {
                        let count = requests + 1;
                        conn.execute(
                            "UPDATE rate_limits
                             SET requests = ?3, updated_at = ?4
                             WHERE identifier = ?1 AND endpoint = ?2",
                            params![identifier, endpoint, count, now_str],
                        )?;

                        if count > max_requests {
                            let elapsed = (now - window_start).num_seconds().max(0) as u64;
                            let retry_after_secs = window_secs.saturating_sub(elapsed).max(1);
                            return Err(ApiError::RateLimited { retry_after_secs });
                        }
                        Ok(())
                    }
                    // Expired window, corrupt row, or first request: fresh window
                    _ => {
                        conn.execute(
                            "INSERT INTO rate_limits
                                (identifier, endpoint, requests, window_start, created_at, updated_at)
                             VALUES (?1, ?2, 1, ?3, ?3, ?3)
                             ON CONFLICT (identifier, endpoint) DO UPDATE SET
                                requests = 1,
                                window_start = excluded.window_start,
                                updated_at = excluded.updated_at",
                            params![identifier, endpoint, now_str],
                        )?;
                        Ok(())
                    }
                }
            })
            .await
            .map_err(ApiError::from)
    }
}
