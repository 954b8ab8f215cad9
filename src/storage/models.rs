//! Storage record models for the search history.
//!
//! Records are kept separate from [`RecentQuery`](crate::domain::RecentQuery)
//! so the on-disk format can carry bookkeeping the UI never sees.

use serde::{Deserialize, Serialize};

/// One remembered query, keyed in storage by its lowercased text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Query text as it was last typed.
    pub query: String,

    /// Number of delivered searches for this query.
    pub count: u32,

    /// Unix timestamp of the first delivered search.
    pub first_searched: i64,

    /// Unix timestamp of the most recent delivered search.
    pub last_searched: i64,
}

impl QueryRecord {
    /// Creates a record for a query searched once at `timestamp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::storage::QueryRecord;
    ///
    /// let record = QueryRecord::new("rust async", 1_700_000_000);
    /// assert_eq!(record.count, 1);
    /// assert_eq!(record.first_searched, record.last_searched);
    /// ```
    pub fn new(query: impl Into<String>, timestamp: i64) -> Self {
        Self {
            query: query.into(),
            count: 1,
            first_searched: timestamp,
            last_searched: timestamp,
        }
    }

    /// Storage key: queries differing only by case share one record.
    #[must_use]
    pub fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }
}
