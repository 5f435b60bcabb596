//! Async store client.
//!
//! [`Store`] is the seam the verification runner talks to. [`SqliteStore`]
//! implements it on top of the r2d2 pool, moving every blocking rusqlite
//! call onto tokio's blocking thread pool.

use async_trait::async_trait;
use entrycheck_common::{Error, Result};
use rusqlite::Connection;

use crate::models::{TestEntry, TEST_ENTITY};
use crate::pool::{self, DbPool, PoolOptions};
use crate::queries::test_entries;

/// A connected handle to a persistent store of test entries.
///
/// Handles are obtained already connected. `disconnect` consumes the
/// handle, so a store can be released at most once.
#[async_trait]
pub trait Store: Send + Sync + Sized {
    /// Insert a new entry with the given name; the store assigns id and
    /// timestamp.
    async fn insert_test_entry(&self, name: &str) -> Result<TestEntry>;

    /// Read every entry currently in the store. No filter, no pagination.
    async fn find_all_test_entries(&self) -> Result<Vec<TestEntry>>;

    /// Release the connection.
    async fn disconnect(self) -> Result<()>;
}

const MEMORY_LOCATION: &str = ":memory:";

/// SQLite-backed [`Store`].
pub struct SqliteStore {
    pool: DbPool,
    location: String,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_path` and bring its
    /// schema up to date. `:memory:` yields a private in-memory database.
    pub async fn connect(db_path: impl Into<String>, options: PoolOptions) -> Result<Self> {
        let location = db_path.into();
        if location == MEMORY_LOCATION {
            return Self::connect_in_memory().await;
        }
        tracing::debug!(path = %location, "connecting to store");

        let path = location.clone();
        let pool = tokio::task::spawn_blocking(move || pool::init_pool(&path, &options))
            .await
            .map_err(|e| Error::internal(format!("spawn_blocking join error: {e}")))??;

        tracing::info!(path = %location, "connected to store");
        Ok(Self { pool, location })
    }

    /// Connect to a fresh in-memory database.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = tokio::task::spawn_blocking(pool::init_memory_pool)
            .await
            .map_err(|e| Error::internal(format!("spawn_blocking join error: {e}")))??;

        Ok(Self {
            pool,
            location: MEMORY_LOCATION.to_string(),
        })
    }

    /// Where this store lives (file path or `:memory:`).
    pub fn location(&self) -> &str {
        &self.location
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool::get_conn(&pool)?;
            f(&conn)
        })
        .await
        .map_err(|e| Error::internal(format!("spawn_blocking join error: {e}")))?
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_test_entry(&self, name: &str) -> Result<TestEntry> {
        let name = name.to_owned();
        let entry = self
            .with_conn(move |conn| test_entries::create_test_entry(conn, &name))
            .await?;

        tracing::debug!(entity = TEST_ENTITY, id = %entry.id, "inserted test entry");
        Ok(entry)
    }

    async fn find_all_test_entries(&self) -> Result<Vec<TestEntry>> {
        let entries = self.with_conn(test_entries::list_test_entries).await?;

        tracing::debug!(entity = TEST_ENTITY, count = entries.len(), "read test entries");
        Ok(entries)
    }

    async fn disconnect(self) -> Result<()> {
        // Fold the WAL back into the main file so the database is complete
        // on disk once the pool is gone.
        let checkpoint = self
            .with_conn(|conn| {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
                    .map_err(|e| Error::database(e.to_string()))
            })
            .await;

        let Self { pool, location } = self;
        drop(pool);

        tracing::info!(path = %location, "disconnected from store");
        checkpoint
    }
}
