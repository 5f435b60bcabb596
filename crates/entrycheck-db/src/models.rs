//! Rust structs mapping to database tables.

use chrono::{DateTime, Utc};
use entrycheck_common::TestEntryId;
use rusqlite::types::Type;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity name the `test_entries` table stores.
pub const TEST_ENTITY: &str = "Test";

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    let uuid = Uuid::parse_str(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))?;
    Ok(T::from(uuid))
}

/// Parse an RFC 3339 timestamp from a text column.
fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// One stored `Test` entity instance.
///
/// `id` and `created_at` are assigned by the store on insert; entries are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntry {
    pub id: TestEntryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl TestEntry {
    /// Column list matching [`TestEntry::from_row`].
    pub const COLUMNS: &'static str = "id, name, created_at";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            created_at: parse_timestamp(row, 2)?,
        })
    }
}
