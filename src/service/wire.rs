//! JSON wire format shared with the aggregation service.
//!
//! Requests are encoded here and responses decoded here; nothing else in the
//! crate touches raw bodies. Decoding a search response never fails with an
//! [`OmniSearchError`]: a bad status or body becomes a [`DispatchFailure`]
//! that the dispatcher routes through its failure policy.

use crate::domain::{ContentKind, OmniSearchError, Query, Result, SearchResponse, Topic};
use crate::search::classifier::normalize_kind;
use crate::search::DispatchFailure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest service error body quoted back in a transport failure.
const MAX_ERROR_SNIPPET: usize = 160;

/// Body of `POST /api/search/universal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub content_types: Vec<ContentKind>,
    pub limit: u32,
}

impl SearchRequest {
    /// A request for every content kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::domain::Query;
    /// use omnisearch::service::SearchRequest;
    ///
    /// let request = SearchRequest::for_query(&Query::parse("rust").unwrap(), 50);
    /// let body = String::from_utf8(request.to_body().unwrap()).unwrap();
    /// assert_eq!(
    ///     body,
    ///     r#"{"query":"rust","content_types":["code","videos","papers","datasets"],"limit":50}"#
    /// );
    /// ```
    #[must_use]
    pub fn for_query(query: &Query, limit: u32) -> Self {
        Self {
            query: query.as_str().to_string(),
            content_types: ContentKind::ALL.to_vec(),
            limit,
        }
    }

    /// Serializes the request as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`OmniSearchError::Decode`] if serialization fails.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| OmniSearchError::Decode(format!("failed to encode search request: {e}")))
    }
}

/// Decodes the answer to a search request.
///
/// A non-2xx status is a transport failure carrying the start of the body;
/// a 2xx status with a body that is not a [`SearchResponse`] is a decode
/// failure.
///
/// # Errors
///
/// Returns the [`DispatchFailure`] describing why the body is not a usable
/// response.
pub fn decode_search_response(status: u16, body: &[u8]) -> std::result::Result<SearchResponse, DispatchFailure> {
    if !(200..300).contains(&status) {
        return Err(DispatchFailure::Transport {
            status,
            message: snippet(body),
        });
    }

    serde_json::from_slice(body).map_err(|e| DispatchFailure::Decode(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct TrendingPayload {
    trending: BTreeMap<String, Vec<String>>,
}

/// Decodes `GET /api/trending` into canvas topics.
///
/// Topics are ordered by content kind, then in the order the service listed
/// them. Labels the classifier does not recognize are skipped.
///
/// # Errors
///
/// Returns [`OmniSearchError::Decode`] for a non-2xx status or a malformed
/// body.
pub fn decode_trending(status: u16, body: &[u8]) -> Result<Vec<Topic>> {
    if !(200..300).contains(&status) {
        return Err(OmniSearchError::Decode(format!(
            "trending request failed with status {status}: {}",
            snippet(body)
        )));
    }

    let payload: TrendingPayload = serde_json::from_slice(body)
        .map_err(|e| OmniSearchError::Decode(format!("failed to parse trending topics: {e}")))?;

    let mut by_kind: BTreeMap<ContentKind, Vec<String>> = BTreeMap::new();
    for (label, names) in payload.trending {
        match normalize_kind(&label) {
            Some(kind) => by_kind.entry(kind).or_default().extend(names),
            None => tracing::debug!(label = %label, "skipping trending topics for unknown kind"),
        }
    }

    Ok(by_kind
        .into_iter()
        .flat_map(|(kind, names)| {
            names
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .map(move |name| Topic::new(name, kind))
        })
        .collect())
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.chars().count() > MAX_ERROR_SNIPPET {
        let cut: String = text.chars().take(MAX_ERROR_SNIPPET).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_transport_failure() {
        let failure = decode_search_response(502, b"  bad gateway \n").unwrap_err();
        assert_eq!(
            failure,
            DispatchFailure::Transport {
                status: 502,
                message: "bad gateway".to_string()
            }
        );
    }

    #[test]
    fn malformed_body_is_decode_failure() {
        let failure = decode_search_response(200, b"<html>").unwrap_err();
        assert!(matches!(failure, DispatchFailure::Decode(_)));
    }

    #[test]
    fn service_response_with_singular_kinds_decodes() {
        let body = br#"{
            "query": "Rust",
            "total_results": 2,
            "results": [
                {"id":"v1","title":"Rust in 100 seconds","description":"","url":"https://youtu.be/x","source_type":"video","metadata":{"channel":"Fireship"},"relevance_score":0.9},
                {"id":"c1","title":"rust-lang/rust","description":"","url":"https://github.com/rust-lang/rust","source_type":"code","metadata":{},"relevance_score":0.8}
            ],
            "results_by_type": {}
        }"#;
        let response = decode_search_response(200, body).unwrap();
        assert_eq!(response.total_results, 2);
        assert_eq!(response.results[0].source_type, "video");
    }

    #[test]
    fn long_error_bodies_are_cut() {
        let body = "e".repeat(500);
        let DispatchFailure::Transport { message, .. } = decode_search_response(500, body.as_bytes()).unwrap_err() else {
            panic!("expected transport failure");
        };
        assert_eq!(message.chars().count(), MAX_ERROR_SNIPPET + 3);
    }

    #[test]
    fn trending_is_grouped_in_kind_order() {
        let body = br#"{"trending":{
            "videos":["AI Tutorial"],
            "code":["FastAPI","React"],
            "podcasts":["ignored"],
            "dataset":["Climate Data", "  "]
        }}"#;
        let topics = decode_trending(200, body).unwrap();
        let names: Vec<(&str, ContentKind)> = topics.iter().map(|t| (t.name.as_str(), t.kind)).collect();
        assert_eq!(
            names,
            [
                ("FastAPI", ContentKind::Code),
                ("React", ContentKind::Code),
                ("AI Tutorial", ContentKind::Videos),
                ("Climate Data", ContentKind::Datasets),
            ]
        );
    }

    #[test]
    fn trending_failure_status_is_an_error() {
        assert!(matches!(decode_trending(404, b"{}"), Err(OmniSearchError::Decode(_))));
    }
}
