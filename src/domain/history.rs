//! Recently searched queries, as shown on the canvas.

use serde::{Deserialize, Serialize};

/// A previously delivered search, ranked by the worker before it reaches the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentQuery {
    /// Query text as the user last typed it.
    pub text: String,
    /// How many times the query was searched.
    pub count: u32,
    /// Unix timestamp of the latest search.
    pub last_searched: i64,
}
