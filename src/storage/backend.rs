//! Storage backend abstraction.
//!
//! [`HistoryStore`] covers exactly what the worker needs: record a delivered
//! query, list everything, and wipe it.

use crate::domain::Result;
use crate::storage::models::QueryRecord;

/// Abstraction over persistent history backends.
///
/// # Implementations
///
/// - [`JsonHistoryStore`](crate::storage::JsonHistoryStore): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use omnisearch::storage::{HistoryStore, JsonHistoryStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonHistoryStore::new(PathBuf::from("/tmp/history.json"))?;
/// store.record("rust async", 1_700_000_000)?;
/// let records = store.all()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait HistoryStore: Send {
    /// Records one delivered search for `query` at `timestamp`.
    ///
    /// Creates the record on first use, otherwise bumps its count and
    /// last-searched time. Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is blank or the write fails.
    fn record(&mut self, query: &str, timestamp: i64) -> Result<QueryRecord>;

    /// Returns every record, unsorted.
    ///
    /// Ranking is the caller's job, see [`crate::storage::frecency::rank`].
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn all(&self) -> Result<Vec<QueryRecord>>;

    /// Removes every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear(&mut self) -> Result<()>;
}
