//! Shared helpers for integration tests.
//!
//! [`TestDb`] owns a temporary directory holding a file-backed database, so
//! every test gets its own store that disappears with the harness.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use entrycheck_db::pool::PoolOptions;
use tempfile::TempDir;

pub struct TestDb {
    pub dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Path of the database file (created on first connect).
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("entrycheck.db")
    }

    pub fn path_string(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// A path SQLite cannot open: its parent directory does not exist.
    pub fn unreachable_path(&self) -> PathBuf {
        self.dir.path().join("missing").join("entrycheck.db")
    }

    /// Pool options with a short timeout so unreachable stores fail fast.
    pub fn options() -> PoolOptions {
        PoolOptions {
            max_size: 2,
            connect_timeout: Duration::from_millis(250),
        }
    }

    /// Write a config file pointing at this harness's database.
    pub fn write_config(&self, db_path: &std::path::Path) -> PathBuf {
        let config_path = self.dir.path().join("entrycheck.toml");
        let contents = format!(
            "[database]\npath = {:?}\npool_size = 2\nconnect_timeout_ms = 250\n",
            db_path.to_string_lossy()
        );
        std::fs::write(&config_path, contents).expect("failed to write config");
        config_path
    }
}
