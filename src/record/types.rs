//! Type definitions for test records.
//!
//! A **record** is one logged test attempt. [`RecordInput`] is what the
//! caller submits (the form fields); [`TestRecord`] is the stored shape with
//! the assigned id and the derived `attempted`/`skipped` counts.
//!
//! # Serialization Note
//!
//! Field names serialize in camelCase so persisted state and backup files
//! stay byte-compatible with exports produced by earlier versions of the
//! tracker (`testName`, `totalScore`, ...).

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Caller-supplied fields for creating or updating a record.
///
/// The id and the derived counts are never supplied: the store assigns the
/// id (or preserves it on update) and computes `attempted`/`skipped` itself.
///
/// Apart from the question cap, values are deliberately unconstrained —
/// `score > total_score` or `rank > total_students` are the user's own
/// data-entry problem, not the store's.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordInput {
    /// Name of the test (free text).
    pub test_name: String,

    /// Test category, used as the history filter key (free text).
    pub test_type: String,

    /// Marks obtained.
    pub score: f64,

    /// Maximum obtainable marks.
    pub total_score: f64,

    /// Rank achieved (lower is better).
    pub rank: u32,

    /// Number of students in the ranking.
    pub total_students: u32,

    /// Percentile, 0–100 expected.
    pub percentile: f64,

    /// Accuracy percentage, 0–100 expected.
    pub accuracy: f64,

    /// Questions answered correctly.
    pub correct: u32,

    /// Questions answered incorrectly.
    pub incorrect: u32,
}

/// A stored test attempt — the core data type in PerfTrack.
///
/// Records are flat: there are no relationships between them. Equality is
/// field-for-field, which is what the export/import round-trip law checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    /// Unique identifier: Unix milliseconds at creation time.
    pub id: RecordId,

    /// Name of the test.
    pub test_name: String,

    /// Test category, used as the history filter key.
    pub test_type: String,

    /// Marks obtained.
    pub score: f64,

    /// Maximum obtainable marks.
    pub total_score: f64,

    /// Rank achieved (lower is better).
    pub rank: u32,

    /// Number of students in the ranking.
    pub total_students: u32,

    /// Percentile, 0–100 expected.
    pub percentile: f64,

    /// Accuracy percentage, 0–100 expected.
    pub accuracy: f64,

    /// Questions answered correctly.
    pub correct: u32,

    /// Questions answered incorrectly.
    pub incorrect: u32,

    /// Derived: `correct + incorrect`.
    pub attempted: u32,

    /// Derived: `total_questions - attempted`.
    pub skipped: u32,
}

impl TestRecord {
    /// Builds a record from validated input.
    ///
    /// Callers must have run [`validate_input`](super::validate_input) with
    /// the same `total_questions` first; the subtraction below relies on
    /// `attempted <= total_questions`.
    pub(crate) fn from_input(id: RecordId, input: RecordInput, total_questions: u32) -> Self {
        let attempted = input.correct + input.incorrect;
        Self {
            id,
            test_name: input.test_name,
            test_type: input.test_type,
            score: input.score,
            total_score: input.total_score,
            rank: input.rank,
            total_students: input.total_students,
            percentile: input.percentile,
            accuracy: input.accuracy,
            correct: input.correct,
            incorrect: input.incorrect,
            attempted,
            skipped: total_questions - attempted,
        }
    }
}
