//! Kind-specific metadata formatting for result badges and the focus screen.
//!
//! Metadata is free-form JSON from the service. Missing or mistyped keys are
//! skipped, never treated as errors.

use crate::domain::{ContentKind, SearchResult};
use crate::search::classifier;
use serde_json::Value;

/// A labelled value on the focus screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// One-line summary shown next to a result in the list.
///
/// | kind | badge |
/// |---|---|
/// | code | `★ 1,234 · Rust` |
/// | videos | channel name |
/// | papers | `412 citations · Vaswani +7` |
/// | datasets | `12.50 MB` |
#[must_use]
pub fn badge(result: &SearchResult) -> Option<String> {
    let parts: Vec<String> = match classifier::kind_of(result)? {
        ContentKind::Code => [
            count(result, "stars").map(|stars| format!("★ {stars}")),
            text(result, "language"),
        ]
        .into_iter()
        .flatten()
        .collect(),
        ContentKind::Videos => text(result, "channel").into_iter().collect(),
        ContentKind::Papers => [
            count(result, "citations").map(|c| format!("{c} citations")),
            first_author(result),
        ]
        .into_iter()
        .flatten()
        .collect(),
        ContentKind::Datasets => size_mb(result).into_iter().collect(),
    };

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

/// Detail fields for the focus screen, in display order.
#[must_use]
pub fn detail_fields(result: &SearchResult) -> Vec<DetailField> {
    let fields: Vec<(&'static str, Option<String>)> = match classifier::kind_of(result) {
        Some(ContentKind::Videos) => vec![
            ("Channel", text(result, "channel")),
            ("Published", date(result, "published_at")),
        ],
        Some(ContentKind::Code) => vec![
            ("Language", text(result, "language")),
            ("Stars", count(result, "stars")),
            ("Forks", count(result, "forks")),
            ("Updated", date(result, "updated_at")),
        ],
        Some(ContentKind::Papers) => vec![
            ("Authors", authors(result)),
            ("Year", number(result, "year").map(|y| y.to_string())),
            ("Citations", count(result, "citations")),
        ],
        Some(ContentKind::Datasets) => vec![
            ("Size", size_mb(result)),
            ("File types", list(result, "files").map(|files| files.join(", "))),
            ("Updated", date(result, "updated_at")),
            ("Downloads", count(result, "download_count")),
            ("Votes", count(result, "votes")),
            ("Creator", text(result, "creator")),
        ],
        None => Vec::new(),
    };

    fields
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| DetailField { label, value }))
        .collect()
}

/// True for the synthetic links built when a search fails.
#[must_use]
pub fn is_fallback(result: &SearchResult) -> bool {
    result.metadata.get("fallback").and_then(Value::as_bool).unwrap_or(false)
}

fn text(result: &SearchResult, key: &str) -> Option<String> {
    let value = result.metadata.get(key)?.as_str()?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn number(result: &SearchResult, key: &str) -> Option<u64> {
    let value = result.metadata.get(key)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
}

fn count(result: &SearchResult, key: &str) -> Option<String> {
    number(result, key).map(group_thousands)
}

fn list(result: &SearchResult, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = result
        .metadata
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect();
    (!items.is_empty()).then_some(items)
}

fn authors(result: &SearchResult) -> Option<String> {
    list(result, "authors").map(|authors| authors.join(", "))
}

fn first_author(result: &SearchResult) -> Option<String> {
    let authors = list(result, "authors")?;
    let first = authors.first()?.clone();
    Some(match authors.len() {
        1 => first,
        n => format!("{first} +{}", n - 1),
    })
}

#[allow(clippy::cast_precision_loss)]
fn size_mb(result: &SearchResult) -> Option<String> {
    let bytes = result.metadata.get("size")?.as_f64()?;
    (bytes > 0.0).then(|| format!("{:.2} MB", bytes / 1024.0 / 1024.0))
}

/// RFC 3339 timestamps become `YYYY-MM-DD`; anything else is shown as-is.
fn date(result: &SearchResult, key: &str) -> Option<String> {
    let raw = text(result, key)?;
    Some(
        chrono::DateTime::parse_from_rfc3339(&raw)
            .map_or(raw, |dt| dt.format("%Y-%m-%d").to_string()),
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(source_type: &str, metadata: Value) -> SearchResult {
        SearchResult {
            id: "1".into(),
            title: "t".into(),
            description: String::new(),
            url: "https://example.com".into(),
            source_type: source_type.into(),
            thumbnail_url: None,
            metadata: metadata.as_object().cloned().unwrap_or_default(),
            relevance_score: 0.5,
        }
    }

    #[test]
    fn code_badge_shows_stars_and_language() {
        let r = result("code", json!({"stars": 98_765, "language": "Rust"}));
        assert_eq!(badge(&r).as_deref(), Some("★ 98,765 · Rust"));
    }

    #[test]
    fn paper_badge_abbreviates_authors() {
        let r = result("paper", json!({"citations": 1200, "authors": ["Vaswani", "Shazeer", "Parmar"]}));
        assert_eq!(badge(&r).as_deref(), Some("1,200 citations · Vaswani +2"));
    }

    #[test]
    fn badge_is_absent_without_metadata() {
        assert_eq!(badge(&result("video", json!({}))), None);
        assert_eq!(badge(&result("podcast", json!({"channel": "x"}))), None);
    }

    #[test]
    fn dataset_fields_cover_the_kaggle_metadata() {
        let r = result(
            "dataset",
            json!({
                "size": 13_107_200,
                "files": ["CSV", "JSON"],
                "updated_at": "2024-03-05T10:00:00Z",
                "download_count": 4321,
                "votes": 17,
                "creator": "someone"
            }),
        );
        let fields = detail_fields(&r);
        let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
        assert_eq!(labels, ["Size", "File types", "Updated", "Downloads", "Votes", "Creator"]);
        assert_eq!(fields[0].value, "12.50 MB");
        assert_eq!(fields[2].value, "2024-03-05");
        assert_eq!(fields[3].value, "4,321");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        let r = result("video", json!({"channel": "Rust Conf", "published_at": "last week"}));
        let fields = detail_fields(&r);
        assert_eq!(fields[1], DetailField { label: "Published", value: "last week".into() });
    }

    #[test]
    fn year_is_not_grouped() {
        let r = result("paper", json!({"year": 2017}));
        assert_eq!(detail_fields(&r)[0].value, "2017");
    }

    #[test]
    fn fallback_flag_is_read_from_metadata() {
        assert!(is_fallback(&result("code", json!({"fallback": true}))));
        assert!(!is_fallback(&result("code", json!({}))));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
