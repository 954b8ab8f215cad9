//! Locally synthesized responses used when the service cannot answer.
//!
//! A fallback response has one result per content kind, each linking to the
//! public search page of the site that kind is usually sourced from. It
//! satisfies every [`SearchResponse`] invariant, so the view layer can treat it
//! like any other result set.

use super::classifier::service_label;
use crate::domain::{ContentKind, Query, SearchResponse, SearchResult};
use serde_json::{Map, Value};

/// Builds the fallback response for `query`.
///
/// # Examples
///
/// ```
/// use omnisearch::domain::Query;
/// use omnisearch::search::fallback::fallback_response;
///
/// let response = fallback_response(&Query::parse("x").unwrap());
/// assert_eq!(response.query, "x");
/// assert_eq!(response.total_results, 4);
/// ```
#[must_use]
pub fn fallback_response(query: &Query) -> SearchResponse {
    let encoded = encode_component(query.as_str());

    let results: Vec<SearchResult> = ContentKind::ALL
        .into_iter()
        .map(|kind| fallback_result(kind, query.as_str(), &encoded))
        .collect();

    SearchResponse {
        query: query.as_str().to_string(),
        total_results: results.len() as u64,
        results,
    }
}

fn fallback_result(kind: ContentKind, query: &str, encoded: &str) -> SearchResult {
    let (site, url) = match kind {
        ContentKind::Code => ("GitHub", format!("https://github.com/search?q={encoded}&type=repositories")),
        ContentKind::Videos => ("YouTube", format!("https://www.youtube.com/results?search_query={encoded}")),
        ContentKind::Papers => ("Semantic Scholar", format!("https://www.semanticscholar.org/search?q={encoded}")),
        ContentKind::Datasets => ("Kaggle", format!("https://www.kaggle.com/datasets?search={encoded}")),
    };

    let mut metadata = Map::new();
    metadata.insert("fallback".to_string(), Value::Bool(true));
    metadata.insert("site".to_string(), Value::String(site.to_string()));

    SearchResult {
        id: format!("fallback-{}", kind.label()),
        title: format!("Search {site} for \"{query}\""),
        description: format!(
            "The search service did not answer. Open this link to look for {} directly on {site}.",
            kind.label()
        ),
        url,
        source_type: service_label(kind).to_string(),
        thumbnail_url: None,
        metadata,
        relevance_score: 0.0,
    }
}

/// Percent-encodes `input` for use in a URL query component.
///
/// Unreserved characters (RFC 3986) pass through; every other byte of the
/// UTF-8 encoding becomes `%XX`.
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
