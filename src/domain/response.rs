//! Search results and responses as delivered by the aggregation service.
//!
//! These types mirror the service's JSON response shape. `source_type` is kept
//! as the raw service string; use [`crate::search::classifier`] to obtain a
//! [`ContentKind`](super::ContentKind).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier, unique within one response.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Canonical URL of the item.
    pub url: String,
    /// Raw service-side kind label (`"code"`, `"video"`, `"paper"`, `"dataset"`).
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Kind-specific free-form metadata (stars, channel, authors, ...).
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Service-supplied relevance in `[0.0, 1.0]`. Display only.
    #[serde(default)]
    pub relevance_score: f64,
}

impl SearchResult {
    /// Relevance as a whole percentage, clamped to 0-100.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::domain::SearchResult;
    ///
    /// let mut result: SearchResult = serde_json::from_str(
    ///     r#"{"id":"1","title":"t","description":"d","url":"u","source_type":"code"}"#,
    /// ).unwrap();
    /// result.relevance_score = 0.876;
    /// assert_eq!(result.relevance_percent(), 88);
    /// ```
    #[must_use]
    pub fn relevance_percent(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.relevance_score.clamp(0.0, 1.0) * 100.0).round() as u8;
        percent
    }
}

/// A complete result set for one query.
///
/// `results` is in relevance order; that order is preserved by grouping and
/// filtering. A response is replaced wholesale by the next search, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query text as echoed by the service.
    pub query: String,
    pub total_results: u64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Creates an empty response for `query`.
    #[must_use]
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            total_results: 0,
            results: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload_and_ignores_extra_fields() {
        let body = r#"{
            "query": "rust",
            "total_results": 1,
            "results": [{
                "id": "42",
                "title": "rust-lang/rust",
                "description": "Empowering everyone",
                "url": "https://github.com/rust-lang/rust",
                "source_type": "code",
                "metadata": {"stars": 90000, "language": "Rust"},
                "relevance_score": 1.0
            }],
            "results_by_type": {"code": []}
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.query, "rust");
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].metadata["language"], "Rust");
        assert!(response.results[0].thumbnail_url.is_none());
    }

    #[test]
    fn missing_optional_fields_default() {
        let body = r#"{"query":"x","total_results":0}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.results.is_empty());

        let result: SearchResult = serde_json::from_str(
            r#"{"id":"a","title":"b","description":"c","url":"d","source_type":"paper"}"#,
        )
        .unwrap();
        assert!(result.metadata.is_empty());
        assert!(result.relevance_score.abs() < f64::EPSILON);
    }

    #[test]
    fn relevance_percent_clamps() {
        let mut result = SearchResult {
            id: "1".into(),
            title: String::new(),
            description: String::new(),
            url: String::new(),
            source_type: "video".into(),
            thumbnail_url: None,
            metadata: Map::new(),
            relevance_score: 1.7,
        };
        assert_eq!(result.relevance_percent(), 100);
        result.relevance_score = -0.2;
        assert_eq!(result.relevance_percent(), 0);
    }
}
