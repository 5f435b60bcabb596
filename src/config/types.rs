use entrycheck_db::pool::PoolOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database file; `~` is expanded
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// How long to wait for the store before reporting it unreachable
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Database path with a leading `~` expanded.
    pub fn resolved_path(&self) -> String {
        shellexpand::tilde(&self.path.to_string_lossy()).into_owned()
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.pool_size,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// tracing-subscriber filter directive, e.g. `entrycheck=debug`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./entrycheck.db")
}

fn default_pool_size() -> u32 {
    4
}

fn default_connect_timeout_ms() -> u64 {
    5000
}
