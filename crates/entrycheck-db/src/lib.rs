//! Entrycheck-DB: schema, migrations, queries and the async store client
//!
//! This crate provides database functionality for entrycheck using SQLite
//! with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//! - `store` - Async store trait and the SQLite-backed client
//!
//! # Example
//!
//! ```no_run
//! use entrycheck_db::pool::{get_conn, init_pool, PoolOptions};
//! use entrycheck_db::queries::test_entries;
//!
//! let pool = init_pool("/var/lib/entrycheck/db.sqlite", &PoolOptions::default()).unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let entry = test_entries::create_test_entry(&conn, "Test Entry").unwrap();
//! println!("Created entry: {}", entry.id);
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod store;
