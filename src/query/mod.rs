//! Query engine: derived views and aggregate statistics.
//!
//! Every function here is pure: it takes a record slice (normally a
//! defensive copy from [`Tracker::records`](crate::Tracker::records)) plus
//! criteria, and returns a fresh result. Nothing is cached; the presentation
//! layer recomputes its views after every mutation.
//!
//! All sorts are stable with no secondary key, so ties keep their relative
//! input order.

pub mod filter;

pub use filter::{SortMode, TypeFilter};

use serde::Serialize;

use crate::record::TestRecord;

/// Aggregate statistics over a record collection.
///
/// Produced by [`averages`]. On an empty collection the numeric means are
/// `0.0` and `best_rank` is `None` — the "no data" marker the dashboard
/// renders as `N/A`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Averages {
    /// Arithmetic mean of `score`, or `0.0` with no records.
    pub avg_score: f64,

    /// Minimum `rank` (lower is better), or `None` with no records.
    pub best_rank: Option<u32>,

    /// Arithmetic mean of `accuracy`, or `0.0` with no records.
    pub avg_accuracy: f64,
}

impl Averages {
    /// The best rank as display text, `"N/A"` when there is no data.
    pub fn best_rank_label(&self) -> String {
        match self.best_rank {
            Some(rank) => rank.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// Returns the records passing the given type filter, in input order.
pub fn filter_by_type(records: &[TestRecord], filter: &TypeFilter) -> Vec<TestRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Sorts records according to the given mode.
///
/// [`SortMode::Newest`] returns the input unchanged: the store already keeps
/// its collection descending by id, and re-sorting here would hide a store
/// ordering bug instead of surfacing it.
pub fn sort_records(mut records: Vec<TestRecord>, mode: SortMode) -> Vec<TestRecord> {
    match mode {
        SortMode::Newest => {}
        SortMode::Score => records.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortMode::Rank => records.sort_by_key(|r| r.rank),
    }
    records
}

/// Filters then sorts: the history view in one call.
pub fn filtered_and_sorted(
    records: &[TestRecord],
    filter: &TypeFilter,
    mode: SortMode,
) -> Vec<TestRecord> {
    sort_records(filter_by_type(records, filter), mode)
}

/// Computes aggregate statistics over the given records.
pub fn averages(records: &[TestRecord]) -> Averages {
    if records.is_empty() {
        return Averages {
            avg_score: 0.0,
            best_rank: None,
            avg_accuracy: 0.0,
        };
    }

    let count = records.len() as f64;
    let score_sum: f64 = records.iter().map(|r| r.score).sum();
    let accuracy_sum: f64 = records.iter().map(|r| r.accuracy).sum();
    let best_rank = records.iter().map(|r| r.rank).min();

    Averages {
        avg_score: score_sum / count,
        best_rank,
        avg_accuracy: accuracy_sum / count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordInput;
    use crate::types::RecordId;

    fn record(id: i64, test_type: &str, score: f64, rank: u32, accuracy: f64) -> TestRecord {
        TestRecord::from_input(
            RecordId::from_millis(id),
            RecordInput {
                test_name: format!("Test {}", id),
                test_type: test_type.into(),
                score,
                rank,
                accuracy,
                ..Default::default()
            },
            120,
        )
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let records = vec![record(3, "Mock", 10.0, 5, 50.0), record(2, "PYQ", 20.0, 2, 60.0)];
        assert_eq!(filter_by_type(&records, &TypeFilter::All).len(), 2);
    }

    #[test]
    fn test_filter_by_exact_type() {
        let records = vec![
            record(3, "Mock", 10.0, 5, 50.0),
            record(2, "PYQ", 20.0, 2, 60.0),
            record(1, "Mock", 30.0, 9, 70.0),
        ];
        let mocks = filter_by_type(&records, &"Mock".into());
        assert_eq!(mocks.len(), 2);
        assert!(mocks.iter().all(|r| r.test_type == "Mock"));
    }

    #[test]
    fn test_newest_keeps_input_order() {
        let records = vec![record(3, "Mock", 10.0, 5, 50.0), record(1, "Mock", 30.0, 2, 60.0)];
        let sorted = sort_records(records.clone(), SortMode::Newest);
        assert_eq!(sorted, records);
    }

    #[test]
    fn test_score_sorts_descending() {
        let records = vec![
            record(3, "Mock", 10.0, 5, 50.0),
            record(2, "Mock", 30.0, 2, 60.0),
            record(1, "Mock", 20.0, 9, 70.0),
        ];
        let sorted = sort_records(records, SortMode::Score);
        let scores: Vec<f64> = sorted.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_rank_sorts_ascending() {
        let records = vec![
            record(3, "Mock", 10.0, 5, 50.0),
            record(2, "Mock", 30.0, 2, 60.0),
            record(1, "Mock", 20.0, 9, 70.0),
        ];
        let sorted = sort_records(records, SortMode::Rank);
        let ranks: Vec<u32> = sorted.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![2, 5, 9]);
    }

    #[test]
    fn test_score_ties_preserve_input_order() {
        let records = vec![
            record(3, "Mock", 20.0, 5, 50.0),
            record(2, "Mock", 20.0, 2, 60.0),
            record(1, "Mock", 20.0, 9, 70.0),
        ];
        let sorted = sort_records(records, SortMode::Score);
        let ids: Vec<i64> = sorted.iter().map(|r| r.id.as_millis()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_filtered_and_sorted_composes() {
        let records = vec![
            record(4, "PYQ", 99.0, 1, 90.0),
            record(3, "Mock", 10.0, 5, 50.0),
            record(2, "Mock", 30.0, 2, 60.0),
            record(1, "Mock", 20.0, 9, 70.0),
        ];
        let view = filtered_and_sorted(&records, &"Mock".into(), SortMode::Score);
        let scores: Vec<f64> = view.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_averages_empty_sentinel() {
        let avg = averages(&[]);
        assert_eq!(avg.avg_score, 0.0);
        assert_eq!(avg.avg_accuracy, 0.0);
        assert_eq!(avg.best_rank, None);
        assert_eq!(avg.best_rank_label(), "N/A");
    }

    #[test]
    fn test_averages_means_and_best_rank() {
        let records = vec![
            record(3, "Mock", 10.0, 5, 40.0),
            record(2, "Mock", 20.0, 2, 60.0),
            record(1, "Mock", 30.0, 9, 80.0),
        ];
        let avg = averages(&records);
        assert_eq!(avg.avg_score, 20.0);
        assert_eq!(avg.best_rank, Some(2));
        assert_eq!(avg.best_rank_label(), "2");
        assert_eq!(avg.avg_accuracy, 60.0);
    }
}
