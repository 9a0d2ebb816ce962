//! Database Module
//!
//! SQLite connection management with pragma configuration and schema
//! migrations. All persistent state (translation cache, usage records,
//! rate-limit windows) lives in this single database, accessed through
//! one shared handle.

pub mod migrations;

use std::path::Path;

use tokio_rusqlite::Connection;

use crate::error::{ApiError, Result};

/// Database handle shared by the cache store, usage recorder, stats
/// aggregator and rate limiter.
///
/// Wraps a tokio-rusqlite Connection that runs database operations on a
/// background thread, so handlers never block the async runtime on I/O.
#[derive(Clone, Debug)]
pub struct Db {
    pub(crate) conn: Connection,
}

impl Db {
    /// Opens a database at the specified path.
    ///
    /// Creates the file if it doesn't exist, applies performance pragmas,
    /// and runs any pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| ApiError::Storage(e.into()))?;

        apply_pragmas(&conn).await?;
        migrations::run(&conn).await?;

        Ok(Self { conn })
    }

    /// Opens a temporary in-memory database for testing.
    ///
    /// Applies the same pragma configuration and migrations as file-based
    /// databases.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| ApiError::Storage(e.into()))?;

        apply_pragmas(&conn).await?;
        migrations::run(&conn).await?;

        Ok(Self { conn })
    }
}

async fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.call(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA temp_store=MEMORY;
             PRAGMA foreign_keys=ON;",
        )?;
        Ok(())
    })
    .await
    .map_err(ApiError::Storage)
}
