//! Frecency ranking for recent queries.
//!
//! A query's score is its search count decayed exponentially by the hours
//! since it was last searched:
//!
//! ```text
//! score = count × e^(-age_hours / DECAY_HOURS)
//! ```

use super::models::QueryRecord;

/// Decay constant in hours; a query untouched for three days keeps about 37%
/// of its count.
const DECAY_HOURS: f64 = 72.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Calculates the frecency score of a record at `now` (Unix seconds).
///
/// Timestamps in the future count as age zero.
///
/// # Examples
///
/// ```
/// use omnisearch::storage::{calculate_score, QueryRecord};
///
/// let now = 1_700_000_000;
/// let mut record = QueryRecord::new("rust", now - 3600);
/// record.count = 10;
///
/// let score = calculate_score(&record, now);
/// assert!(score > 9.0 && score < 10.0);
/// ```
#[must_use]
pub fn calculate_score(record: &QueryRecord, now: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let age_hours = (now - record.last_searched).max(0) as f64 / SECONDS_PER_HOUR;

    f64::from(record.count) * f64::exp(-age_hours / DECAY_HOURS)
}

/// Sorts records by descending score and keeps the best `limit`.
///
/// Equal scores fall back to the most recent search first, then to query
/// text, so the order is stable across reloads.
#[must_use]
pub fn rank(mut records: Vec<QueryRecord>, now: i64, limit: usize) -> Vec<QueryRecord> {
    records.sort_by(|a, b| {
        calculate_score(b, now)
            .partial_cmp(&calculate_score(a, now))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.last_searched.cmp(&a.last_searched))
            .then_with(|| a.query.cmp(&b.query))
    });
    records.truncate(limit);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;
    const HOUR: i64 = 3600;

    fn record(query: &str, count: u32, hours_ago: i64) -> QueryRecord {
        QueryRecord {
            query: query.to_string(),
            count,
            first_searched: NOW - hours_ago * HOUR,
            last_searched: NOW - hours_ago * HOUR,
        }
    }

    #[test]
    fn fresh_record_scores_its_count() {
        let score = calculate_score(&record("rust", 4, 0), NOW);
        assert!((score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn score_decays_by_e_every_72_hours() {
        let score = calculate_score(&record("rust", 1, 72), NOW);
        assert!((score - (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn future_timestamps_do_not_inflate_the_score() {
        let score = calculate_score(&record("rust", 2, -10), NOW);
        assert!((score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn frequent_old_query_can_outrank_a_single_recent_one() {
        let ranked = rank(
            vec![record("once", 1, 1), record("often", 20, 48), record("stale", 3, 24 * 30)],
            NOW,
            10,
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(order, ["often", "once", "stale"]);
    }

    #[test]
    fn rank_truncates_to_the_limit() {
        let ranked = rank(vec![record("a", 1, 0), record("b", 2, 0), record("c", 3, 0)], NOW, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].query, "c");
    }

    #[test]
    fn equal_scores_order_by_text() {
        let ranked = rank(vec![record("b", 1, 0), record("a", 1, 0)], NOW, 5);
        assert_eq!(ranked[0].query, "a");
    }
}
