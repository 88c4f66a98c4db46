//! Record management module.
//!
//! A **record** is one logged test attempt with score/rank/accuracy
//! statistics. Records live in a single flat collection owned by
//! [`Tracker`](crate::Tracker), always kept sorted newest-first.
//!
//! # Operations
//!
//! All record operations are available on [`Tracker`](crate::Tracker):
//!
//! - [`create_record(input)`](crate::Tracker::create_record)
//! - [`get_record(id)`](crate::Tracker::get_record)
//! - [`update_record(id, input)`](crate::Tracker::update_record)
//! - [`delete_record(id)`](crate::Tracker::delete_record)
//! - [`records()`](crate::Tracker::records)
//! - [`replace_all(records)`](crate::Tracker::replace_all)

pub mod types;

pub use types::{RecordInput, TestRecord};

use crate::error::{TrackerError, ValidationError};

/// Validates a [`RecordInput`] before storage.
///
/// # Rules
///
/// - `correct + incorrect` must not exceed `total_questions`
///
/// Everything else on a record is free-form: score/total-score and
/// rank/total-students consistency are intentionally not enforced.
pub(crate) fn validate_input(
    input: &RecordInput,
    total_questions: u32,
) -> Result<(), TrackerError> {
    // Widen before adding so two large u32 counts can't wrap.
    let attempted = u64::from(input.correct) + u64::from(input.incorrect);
    if attempted > u64::from(total_questions) {
        return Err(ValidationError::question_cap_exceeded(attempted, total_questions).into());
    }

    Ok(())
}

/// Sorts a collection into canonical order: descending by id, newest first.
///
/// `sort_by` is stable, so records with equal ids (which the store never
/// produces, but imports might) keep their relative input order.
pub(crate) fn sort_newest_first(records: &mut [TestRecord]) {
    records.sort_by(|a, b| b.id.cmp(&a.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;

    fn valid_input() -> RecordInput {
        RecordInput {
            test_name: "Mock Test 3".into(),
            test_type: "Mock".into(),
            score: 182.0,
            total_score: 300.0,
            rank: 120,
            total_students: 9500,
            percentile: 98.7,
            accuracy: 85.0,
            correct: 68,
            incorrect: 12,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_input(&valid_input(), 120).is_ok());
    }

    #[test]
    fn test_cap_boundary_accepted() {
        let mut input = valid_input();
        input.correct = 100;
        input.incorrect = 20;
        assert!(validate_input(&input, 120).is_ok());
    }

    #[test]
    fn test_over_cap_rejected() {
        let mut input = valid_input();
        input.correct = 100;
        input.incorrect = 21;
        let err = validate_input(&input, 120).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let mut input = valid_input();
        input.correct = u32::MAX;
        input.incorrect = u32::MAX;
        let err = validate_input(&input, 120).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut records: Vec<TestRecord> = [3, 1, 2]
            .into_iter()
            .map(|ms| {
                TestRecord::from_input(RecordId::from_millis(ms), valid_input(), 120)
            })
            .collect();

        sort_newest_first(&mut records);

        let ids: Vec<i64> = records.iter().map(|r| r.id.as_millis()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
