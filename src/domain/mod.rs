//! Domain layer for the OmniSearch plugin.
//!
//! This module contains the core domain types: the query text, the four
//! content kinds, and the result set returned by the aggregation service. It is
//! independent of Zellij-specific APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: Validated, trimmed query text
//! - [`kind`]: Client-side content kind vocabulary
//! - [`response`]: Search results and responses as received from the service
//! - [`topic`]: Discovery topics for the canvas
//! - [`history`]: Recently searched queries
//!
//! # Examples
//!
//! ```
//! use omnisearch::domain::{Query, Result};
//!
//! fn parse() -> Result<Query> {
//!     Query::parse("  rust async  ")
//! }
//! assert_eq!(parse().unwrap().as_str(), "rust async");
//! ```

pub mod error;
pub mod history;
pub mod kind;
pub mod query;
pub mod response;
pub mod topic;

pub use error::{OmniSearchError, Result};
pub use history::RecentQuery;
pub use kind::ContentKind;
pub use query::Query;
pub use response::{SearchResponse, SearchResult};
pub use topic::Topic;
