//! Core type definitions for PerfTrack identifiers.
//!
//! Record ids double as creation timestamps: a new id is the current Unix
//! time in milliseconds, which makes descending id order equal to
//! newest-first order and keeps exported backups sortable by eye.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifier: Unix milliseconds at creation time.
///
/// Ids are unique within a collection and preserved across edits. Because
/// the id is the creation timestamp, sorting descending by id yields the
/// newest-first history view without a separate timestamp field.
///
/// # Example
/// ```
/// use perftrack::RecordId;
///
/// let id = RecordId::now();
/// assert!(id.as_millis() > 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Creates a RecordId for the current moment.
    ///
    /// If the system clock is before the Unix epoch (should never happen
    /// in practice), returns an id of 0 (epoch) rather than panicking.
    #[inline]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self(duration.as_millis() as i64)
    }

    /// Creates a RecordId from Unix milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the id as Unix milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns the id immediately after this one.
    ///
    /// Used to keep new ids strictly greater than all existing ids when
    /// two records are created within the same millisecond.
    #[inline]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_positive() {
        assert!(RecordId::now().as_millis() > 0);
    }

    #[test]
    fn test_ordering_matches_millis() {
        let older = RecordId::from_millis(1_700_000_000_000);
        let newer = RecordId::from_millis(1_700_000_000_001);
        assert!(newer > older);
        assert_eq!(older.next(), newer);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = RecordId::from_millis(1_700_000_000_000);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1700000000000");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
