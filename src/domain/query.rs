//! Validated query text.

use super::error::{OmniSearchError, Result};
use std::fmt;

/// A trimmed, non-empty search query.
///
/// The only way to build a `Query` is [`Query::parse`], so a `Query` value can
/// never be dispatched empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Trims `raw` and validates that something is left.
    ///
    /// # Errors
    ///
    /// Returns [`OmniSearchError::EmptyQuery`] if `raw` is empty after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::domain::Query;
    ///
    /// assert_eq!(Query::parse("\tclimate data \n").unwrap().as_str(), "climate data");
    /// assert!(Query::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OmniSearchError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the query, returning the text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_rejected() {
        for raw in ["", " ", "\t\n", "   \r\n  "] {
            assert!(matches!(Query::parse(raw), Err(OmniSearchError::EmptyQuery)));
        }
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let query = Query::parse("  deep   learning ").unwrap();
        assert_eq!(query.as_str(), "deep   learning");
        assert_eq!(query.to_string(), "deep   learning");
    }
}
