//! Property-based tests for the store and query invariants.
//!
//! Verified with random inputs:
//! - Derived-field arithmetic for every valid correct/incorrect split
//! - The question-cap rejection for every invalid split
//! - The newest-first ordering invariant across create sequences
//! - The export/import round-trip law over arbitrary collections
//! - Score-sort ordering over arbitrary collections

use perftrack::storage::MemoryStorage;
use perftrack::{query, Config, RecordId, RecordInput, SortMode, TestRecord, Tracker, TypeFilter};
use proptest::prelude::*;

fn memory_tracker() -> Tracker {
    Tracker::open_with_storage(Box::new(MemoryStorage::new()), Config::default()).unwrap()
}

prop_compose! {
    fn arb_record()(
        id in 0i64..4_000_000_000_000,
        test_name in "[a-zA-Z0-9 ]{0,24}",
        test_type in prop::sample::select(vec!["Mock", "PYQ", "Sectional"]),
        score in 0.0f64..300.0,
        total_score in 0.0f64..300.0,
        rank in 0u32..100_000,
        total_students in 0u32..1_000_000,
        percentile in 0.0f64..100.0,
        accuracy in 0.0f64..100.0,
        correct in 0u32..=120,
        incorrect in 0u32..=120,
        attempted in 0u32..=240,
        skipped in 0u32..=120,
    ) -> TestRecord {
        TestRecord {
            id: RecordId::from_millis(id),
            test_name,
            test_type: test_type.to_string(),
            score,
            total_score,
            rank,
            total_students,
            percentile,
            accuracy,
            correct,
            incorrect,
            attempted,
            skipped,
        }
    }
}

proptest! {
    #[test]
    fn create_derives_fields_for_all_valid_splits(correct in 0u32..=120) {
        let incorrect_max = 120 - correct;
        let tracker = memory_tracker();

        for incorrect in [0, incorrect_max / 2, incorrect_max] {
            let record = tracker.create_record(RecordInput {
                correct,
                incorrect,
                ..Default::default()
            }).unwrap();

            prop_assert_eq!(record.attempted, correct + incorrect);
            prop_assert_eq!(record.skipped, 120 - (correct + incorrect));
        }
    }

    #[test]
    fn create_rejects_all_over_cap_splits(
        correct in 0u32..=1000,
        incorrect in 0u32..=1000,
    ) {
        prop_assume!(correct + incorrect > 120);

        let tracker = memory_tracker();
        let result = tracker.create_record(RecordInput {
            correct,
            incorrect,
            ..Default::default()
        });

        prop_assert!(result.unwrap_err().is_validation());
        prop_assert_eq!(tracker.record_count(), 0);
    }

    #[test]
    fn collection_stays_newest_first_across_creates(count in 1usize..30) {
        let tracker = memory_tracker();
        for i in 0..count {
            tracker.create_record(RecordInput {
                test_name: format!("t{}", i),
                ..Default::default()
            }).unwrap();
        }

        let records = tracker.records();
        prop_assert_eq!(records.len(), count);
        for pair in records.windows(2) {
            prop_assert!(pair[0].id > pair[1].id);
        }
    }

    #[test]
    fn export_import_round_trips(records in prop::collection::vec(arb_record(), 0..20)) {
        let source = memory_tracker();
        source.replace_all(records).unwrap();
        let snapshot = source.export_snapshot().unwrap();

        let target = memory_tracker();
        target.import_snapshot(&snapshot).unwrap();

        prop_assert_eq!(target.records(), source.records());
    }

    #[test]
    fn score_sort_is_descending(records in prop::collection::vec(arb_record(), 0..20)) {
        let sorted = query::sort_records(records, SortMode::Score);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn filter_output_is_subset_matching_filter(
        records in prop::collection::vec(arb_record(), 0..20),
    ) {
        let filter: TypeFilter = "Mock".into();
        let filtered = query::filter_by_type(&records, &filter);

        prop_assert!(filtered.iter().all(|r| r.test_type == "Mock"));
        let expected = records.iter().filter(|r| r.test_type == "Mock").count();
        prop_assert_eq!(filtered.len(), expected);
    }

    #[test]
    fn averages_mean_lies_within_score_range(
        records in prop::collection::vec(arb_record(), 1..20),
    ) {
        let avg = query::averages(&records);

        let min = records.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);
        let max = records.iter().map(|r| r.score).fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(avg.avg_score >= min - 1e-9);
        prop_assert!(avg.avg_score <= max + 1e-9);
        prop_assert_eq!(avg.best_rank, records.iter().map(|r| r.rank).min());
    }
}
