//! Cache Retention Task
//!
//! Background task that periodically evicts cache entries older than the
//! configured retention period.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::db::Db;

/// Spawns a background task that periodically evicts aged cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Eviction failures are logged and the task keeps
/// running; a transient storage error must not kill retention.
///
/// # Arguments
/// * `db` - Shared database handle
/// * `interval_secs` - Interval in seconds between sweeps
/// * `retention_days` - Entries older than this many days are removed
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_retention_task(db: Db, interval_secs: u64, retention_days: u32) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache retention task: every {}s, retention {} days",
            interval_secs, retention_days
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            match db.evict_older_than(retention_days).await {
                Ok(removed) if removed > 0 => {
                    info!("Retention sweep: evicted {} aged entries", removed);
                }
                Ok(_) => {
                    debug!("Retention sweep: no aged entries found");
                }
                Err(e) => {
                    warn!(error = %e, "Retention sweep failed, will retry");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NewCacheEntry;
    use tokio_rusqlite::params;

    async fn insert_aged_entry(db: &Db, days_old: i64) {
        let entry = NewCacheEntry {
            source_text: "aged text".to_string(),
            translated_text: "texte vieilli".to_string(),
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            provider: "openai".to_string(),
            model: None,
            tokens_used: None,
            cost: None,
        };
        let created_at = (chrono::Utc::now() - chrono::Duration::days(days_old)).to_rfc3339();
        let hash = crate::cache::text_hash(
            &entry.source_text,
            &entry.source_language,
            &entry.target_language,
        );
        db.conn
            .call(move |conn| -> crate::error::Result<()> {
                conn.execute(
                    "INSERT INTO translations_cache (
                        source_language, target_language, source_text, translated_text,
                        source_hash, provider, model, tokens_used, cost, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        entry.source_language,
                        entry.target_language,
                        entry.source_text,
                        entry.translated_text,
                        hash,
                        entry.provider,
                        entry.model,
                        entry.tokens_used,
                        entry.cost,
                        created_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_retention_task_evicts_aged_entries() {
        let db = Db::open_in_memory().await.unwrap();
        insert_aged_entry(&db, 40).await;

        let handle = spawn_retention_task(db.clone(), 1, 30);

        // Wait for at least one sweep
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(db.cache_entry_count().await.unwrap(), 0);
        handle.abort();
    }

    #[tokio::test]
    async fn test_retention_task_preserves_recent_entries() {
        let db = Db::open_in_memory().await.unwrap();
        insert_aged_entry(&db, 5).await;

        let handle = spawn_retention_task(db.clone(), 1, 30);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(db.cache_entry_count().await.unwrap(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_retention_task_can_be_aborted() {
        let db = Db::open_in_memory().await.unwrap();

        let handle = spawn_retention_task(db, 1, 30);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
