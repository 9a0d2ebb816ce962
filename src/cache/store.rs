//! Cache store operations.
//!
//! Lookup, insert, age-based eviction and substring search over the
//! `translations_cache` table. Inserts are append-only: no uniqueness is
//! enforced on the content key, and concurrent duplicate inserts for the
//! same key all land as rows. Lookup orders by insertion time ascending,
//! so the earliest row wins deterministically.

use tokio_rusqlite::{params, rusqlite};

use crate::cache::{text_hash, CacheEntry, NewCacheEntry};
use crate::db::Db;
use crate::error::{ApiError, Result};

const ENTRY_COLUMNS: &str = "id, source_language, target_language, source_text, \
     translated_text, source_hash, provider, model, tokens_used, cost, created_at";

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<CacheEntry> {
    Ok(CacheEntry {
        id: row.get(0)?,
        source_language: row.get(1)?,
        target_language: row.get(2)?,
        source_text: row.get(3)?,
        translated_text: row.get(4)?,
        source_hash: row.get(5)?,
        provider: row.get(6)?,
        model: row.get(7)?,
        tokens_used: row.get(8)?,
        cost: row.get(9)?,
        created_at: row.get(10)?,
    })
}

impl Db {
    // == Lookup ==
    /// Looks up a cached translation for the given text and language pair.
    ///
    /// Computes the content hash and matches it together with the exact
    /// language pair. Absence is not an error; returns `None` on a miss.
    pub async fn lookup_translation(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Option<CacheEntry>> {
        let hash = text_hash(text, source_language, target_language);
        let source_language = source_language.to_string();
        let target_language = target_language.to_string();

        self.conn
            .call(move |conn| -> Result<Option<CacheEntry>> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM translations_cache
                     WHERE source_hash = ?1
                       AND source_language = ?2
                       AND target_language = ?3
                     ORDER BY datetime(created_at) ASC, id ASC
                     LIMIT 1"
                ))?;

                let result =
                    stmt.query_row(params![hash, source_language, target_language], row_to_entry);

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(ApiError::from)
    }

    // == Insert ==
    /// Appends a translation to the cache.
    ///
    /// Does not check for pre-existing duplicates; the caller is expected
    /// to have already performed a lookup.
    pub async fn insert_translation(&self, entry: NewCacheEntry) -> Result<()> {
        let hash = text_hash(
            &entry.source_text,
            &entry.source_language,
            &entry.target_language,
        );
        let created_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<()> {
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
            .map_err(ApiError::from)
    }

    // == Evict ==
    /// Deletes cache entries older than the given number of days.
    ///
    /// Deletion is by age range, not exact timestamp match. Returns the
    /// number of rows removed.
    pub async fn evict_older_than(&self, days: u32) -> Result<u64> {
        let cutoff = (chrono::Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();

        self.conn
            .call(move |conn| -> Result<u64> {
                let count = conn.execute(
                    "DELETE FROM translations_cache
                     WHERE datetime(created_at) < datetime(?1)",
                    params![cutoff],
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(ApiError::from)
    }

    // == Search ==
    /// Returns entries whose source or translated text contains the query
    /// substring, newest first, bounded by `limit`.
    pub async fn search_translations(&self, query: &str, limit: u32) -> Result<Vec<CacheEntry>> {
        let pattern = format!("%{query}%");

        self.conn
            .call(move |conn| -> Result<Vec<CacheEntry>> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM translations_cache
                     WHERE source_text LIKE ?1 OR translated_text LIKE ?1
                     ORDER BY datetime(created_at) DESC, id DESC
                     LIMIT ?2"
                ))?;

                let rows = stmt.query_map(params![pattern, limit], row_to_entry)?;
                let mut entries = Vec::new();
                for row in rows {
                    entries.push(row?);
                }
                Ok(entries)
            })
            .await
            .map_err(ApiError::from)
    }

    // == Count ==
    /// Current number of cache entries.
    pub async fn cache_entry_count(&self) -> Result<i64> {
        self.conn
            .call(|conn| -> Result<i64> {
                let count =
                    conn.query_row("SELECT COUNT(*) FROM translations_cache", [], |row| {
                        row.get(0)
                    })?;
                Ok(count)
            })
            .await
            .map_err(ApiError::from)
    }
}
