//! Entrycheck-Common: Shared error type and identifiers.
//!
//! - **Typed IDs**: [`TestEntryId`], a UUID wrapper for stored test entries
//! - **Error Handling**: [`Error`] and the [`Result`] alias used by every crate
//!
//! # Examples
//!
//! ```
//! use entrycheck_common::{Error, Result, TestEntryId};
//!
//! let id = TestEntryId::new();
//! let parsed: TestEntryId = id.to_string().parse().unwrap();
//! assert_eq!(id, parsed);
//!
//! fn example() -> Result<()> {
//!     Err(Error::database("store unreachable"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
