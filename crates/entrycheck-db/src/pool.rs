//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2.
//! It handles pool initialization, connection customization, and running migrations.

use std::time::Duration;

use entrycheck_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Sizing and timeout settings for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Maximum number of open connections.
    pub max_size: u32,
    /// How long to wait for a connection before giving up.
    pub connect_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 4,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Enable foreign key constraints and WAL journaling on all connections
/// - Run pending database migrations
///
/// A path whose parent directory does not exist (or is not writable) fails
/// once `connect_timeout` elapses with [`Error::Database`].
///
/// # Example
///
/// ```no_run
/// use entrycheck_db::pool::{init_pool, PoolOptions};
///
/// let pool = init_pool("/var/lib/entrycheck/db.sqlite", &PoolOptions::default()).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str, options: &PoolOptions) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )
    });

    let pool = build_pool(manager, options)
        .map_err(|e| Error::database(format!("Failed to open database {db_path}: {e}")))?;

    tracing::debug!(path = db_path, max_size = options.max_size, "opened connection pool");

    migrate_pool(&pool)?;
    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// Each call creates a uniquely-named shared-cache in-memory database so
/// that parallel tests do not interfere with each other, while all
/// connections *within* a single pool still share state.
///
/// # Example
///
/// ```
/// use entrycheck_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:entrycheck_mem_{n}?mode=memory&cache=shared");

    let manager = SqliteConnectionManager::file(uri)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = build_pool(manager, &PoolOptions::default())
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {e}")))?;

    migrate_pool(&pool)?;
    Ok(pool)
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {e}")))
}

fn build_pool(
    manager: SqliteConnectionManager,
    options: &PoolOptions,
) -> std::result::Result<DbPool, r2d2::Error> {
    Pool::builder()
        .max_size(options.max_size)
        .connection_timeout(options.connect_timeout)
        .build(manager)
}

fn migrate_pool(pool: &DbPool) -> Result<()> {
    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {e}")))?;

    migrations::run_migrations(&conn)?;
    Ok(())
}
