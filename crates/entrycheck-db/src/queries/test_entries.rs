//! Test entry database queries.
//!
//! Entries are only ever created and read; nothing here updates or
//! deletes a row.

use chrono::{SecondsFormat, SubsecRound, Utc};
use entrycheck_common::{Error, Result, TestEntryId};
use rusqlite::Connection;

use crate::models::TestEntry;

/// Create a new test entry.
///
/// The store assigns the id and the creation timestamp (microsecond
/// precision, UTC).
///
/// # Returns
///
/// * `Ok(TestEntry)` - The created entry, exactly as it will read back
/// * `Err(Error)` - If a database error occurs
pub fn create_test_entry(conn: &Connection, name: &str) -> Result<TestEntry> {
    let id = TestEntryId::new();
    let created_at = Utc::now().trunc_subsecs(6);

    conn.execute(
        "INSERT INTO test_entries (id, name, created_at) VALUES (:id, :name, :created_at)",
        rusqlite::named_params! {
            ":id": id.to_string(),
            ":name": name,
            ":created_at": created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(TestEntry {
        id,
        name: name.to_string(),
        created_at,
    })
}

/// Get a test entry by ID.
///
/// # Returns
///
/// * `Ok(Some(TestEntry))` - The entry if found
/// * `Ok(None)` - If no entry has this id
/// * `Err(Error)` - If a database error occurs
pub fn get_test_entry(conn: &Connection, id: TestEntryId) -> Result<Option<TestEntry>> {
    let sql = format!(
        "SELECT {} FROM test_entries WHERE id = ?1",
        TestEntry::COLUMNS
    );
    let result = conn.query_row(&sql, [id.to_string()], TestEntry::from_row);

    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List every test entry, oldest first.
pub fn list_test_entries(conn: &Connection) -> Result<Vec<TestEntry>> {
    let sql = format!(
        "SELECT {} FROM test_entries ORDER BY created_at, id",
        TestEntry::COLUMNS
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let entries = stmt
        .query_map([], TestEntry::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(entries)
}

/// Count stored test entries.
pub fn count_test_entries(conn: &Connection) -> Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM test_entries", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as u64)
    .map_err(|e| Error::database(e.to_string()))
}
