//! Result classification by content kind.
//!
//! This is the only place that knows about the service's singular
//! `source_type` vocabulary (`video`, `paper`, `dataset`). Everything else in
//! the crate works with [`ContentKind`]. All functions are pure and borrow the
//! response; grouping and filtering never reorder results.

use super::filter::FilterSet;
use crate::domain::{ContentKind, SearchResponse, SearchResult};
use std::collections::BTreeMap;

/// Results grouped by kind, each group in original relevance order.
///
/// Every [`ContentKind`] has an entry, possibly empty.
pub type Grouped<'a> = BTreeMap<ContentKind, Vec<&'a SearchResult>>;

/// Maps a service `source_type` to its client-side kind.
///
/// The singular service labels are the contract; the plural client labels are
/// accepted too so a service that already speaks the client vocabulary still
/// classifies. Anything else is unrecognized.
///
/// # Examples
///
/// ```
/// use omnisearch::domain::ContentKind;
/// use omnisearch::search::classifier::normalize_kind;
///
/// assert_eq!(normalize_kind("video"), Some(ContentKind::Videos));
/// assert_eq!(normalize_kind("podcast"), None);
/// ```
#[must_use]
pub fn normalize_kind(source_type: &str) -> Option<ContentKind> {
    match source_type {
        "code" => Some(ContentKind::Code),
        "video" | "videos" => Some(ContentKind::Videos),
        "paper" | "papers" => Some(ContentKind::Papers),
        "dataset" | "datasets" => Some(ContentKind::Datasets),
        _ => None,
    }
}

/// Returns the service-side `source_type` label for `kind`.
#[must_use]
pub const fn service_label(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Code => "code",
        ContentKind::Videos => "video",
        ContentKind::Papers => "paper",
        ContentKind::Datasets => "dataset",
    }
}

/// Normalized kind of a single result.
#[must_use]
pub fn kind_of(result: &SearchResult) -> Option<ContentKind> {
    normalize_kind(&result.source_type)
}

/// Groups results by normalized kind.
///
/// Results with an unrecognized `source_type` appear in no group; they are
/// still in `response.results`.
#[must_use]
pub fn classify(response: &SearchResponse) -> Grouped<'_> {
    let mut grouped: Grouped<'_> = ContentKind::ALL.into_iter().map(|kind| (kind, Vec::new())).collect();

    for result in &response.results {
        if let Some(kind) = kind_of(result) {
            grouped.entry(kind).or_default().push(result);
        }
    }

    grouped
}

/// Number of results per kind.
#[must_use]
pub fn counts(response: &SearchResponse) -> BTreeMap<ContentKind, usize> {
    classify(response)
        .into_iter()
        .map(|(kind, results)| (kind, results.len()))
        .collect()
}

/// The subsequence of `response.results` that passes `filters`.
///
/// With an unrestricted filter this is the full sequence, unrecognized kinds
/// included. Otherwise only results whose normalized kind is selected remain.
#[must_use]
pub fn filter<'a>(response: &'a SearchResponse, filters: &FilterSet) -> Vec<&'a SearchResult> {
    if filters.is_all() {
        return response.results.iter().collect();
    }

    response
        .results
        .iter()
        .filter(|result| kind_of(result).is_some_and(|kind| filters.allows(kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FilterToggle;
    use proptest::prelude::*;
    use serde_json::Map;

    fn result(id: &str, source_type: &str) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: format!("title {id}"),
            description: String::new(),
            url: format!("https://example.com/{id}"),
            source_type: source_type.to_string(),
            thumbnail_url: None,
            metadata: Map::new(),
            relevance_score: 0.5,
        }
    }

    fn response(kinds: &[&str]) -> SearchResponse {
        SearchResponse {
            query: "q".to_string(),
            total_results: kinds.len() as u64,
            results: kinds
                .iter()
                .enumerate()
                .map(|(i, kind)| result(&i.to_string(), kind))
                .collect(),
        }
    }

    fn ids(results: &[&SearchResult]) -> Vec<String> {
        results.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn groups_every_kind_and_renames_video() {
        let resp = response(&["video", "code", "paper", "dataset", "video"]);
        let grouped = classify(&resp);

        assert_eq!(grouped.len(), 4);
        assert_eq!(ids(&grouped[&ContentKind::Videos]), ["0", "4"]);
        assert_eq!(ids(&grouped[&ContentKind::Code]), ["1"]);
        assert_eq!(ids(&grouped[&ContentKind::Papers]), ["2"]);
        assert_eq!(ids(&grouped[&ContentKind::Datasets]), ["3"]);
    }

    #[test]
    fn unknown_kinds_only_survive_unrestricted_filter() {
        let resp = response(&["podcast", "code"]);

        let grouped = classify(&resp);
        assert_eq!(grouped.values().map(Vec::len).sum::<usize>(), 1);

        assert_eq!(ids(&filter(&resp, &FilterSet::all())), ["0", "1"]);
        assert_eq!(ids(&filter(&resp, &FilterSet::only([ContentKind::Code]))), ["1"]);
    }

    #[test]
    fn filter_keeps_relative_order_across_kinds() {
        let resp = response(&["video", "code", "paper"]);

        let videos = FilterSet::all().toggle(FilterToggle::Kind(ContentKind::Videos));
        assert_eq!(ids(&filter(&resp, &videos)), ["0"]);

        let videos_and_code = videos.toggle(FilterToggle::Kind(ContentKind::Code));
        assert_eq!(ids(&filter(&resp, &videos_and_code)), ["0", "1"]);
    }

    #[test]
    fn counts_cover_all_kinds() {
        let resp = response(&["paper", "paper", "other"]);
        let counts = counts(&resp);
        assert_eq!(counts[&ContentKind::Papers], 2);
        assert_eq!(counts[&ContentKind::Code], 0);
    }

    #[test]
    fn service_labels_normalize_back() {
        for kind in ContentKind::ALL {
            assert_eq!(normalize_kind(service_label(kind)), Some(kind));
        }
    }

    fn any_source_type() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["code", "video", "paper", "dataset", "videos", "blog", ""])
            .prop_map(String::from)
    }

    proptest! {
        #[test]
        fn groups_are_ordered_subsequences(kinds in prop::collection::vec(any_source_type(), 0..24)) {
            let refs: Vec<&str> = kinds.iter().map(String::as_str).collect();
            let resp = response(&refs);

            for group in classify(&resp).values() {
                let positions: Vec<usize> = group
                    .iter()
                    .map(|r| resp.results.iter().position(|o| o.id == r.id).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }

        #[test]
        fn unrestricted_filter_is_identity(kinds in prop::collection::vec(any_source_type(), 0..24)) {
            let refs: Vec<&str> = kinds.iter().map(String::as_str).collect();
            let resp = response(&refs);

            let all: Vec<SearchResult> = filter(&resp, &FilterSet::all()).into_iter().cloned().collect();
            let empty: Vec<SearchResult> = filter(&resp, &FilterSet::only([])).into_iter().cloned().collect();
            prop_assert_eq!(&all, &resp.results);
            prop_assert_eq!(&empty, &resp.results);
        }
    }
}
