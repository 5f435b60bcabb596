//! Typed ID wrappers.
//!
//! Identifiers are assigned by the store, never by callers, and travel as
//! UUID text in the database and in JSON reports.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

/// Unique identifier for a stored test entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestEntryId(Uuid);

impl TestEntryId {
    /// Generate a new random test entry ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TestEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TestEntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<TestEntryId> for Uuid {
    fn from(id: TestEntryId) -> Self {
        id.0
    }
}

impl FromStr for TestEntryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::invalid_input(format!("invalid test entry id '{s}': {e}")))
    }
}

impl std::fmt::Display for TestEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
