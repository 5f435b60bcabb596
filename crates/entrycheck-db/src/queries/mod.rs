//! Database query modules.
//!
//! - test_entries: create and read operations for the `Test` entity

pub mod test_entries;
