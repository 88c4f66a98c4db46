//! Filter and sort criteria for history views.
//!
//! [`TypeFilter`] and [`SortMode`] are the two user-selected controls over
//! the history list. Both parse from the strings a select element would
//! produce, so the presentation layer can hand its values straight through.

use std::str::FromStr;

use crate::error::ValidationError;
use crate::record::TestRecord;

/// Which test types to include in a view.
///
/// The UI exposes this as a select with an `"all"` option plus one entry per
/// known test type; matching on the type string is exact.
///
/// # Example
///
/// ```rust
/// use perftrack::TypeFilter;
///
/// let all: TypeFilter = "all".into();
/// let mocks: TypeFilter = "Mock".into();
/// assert_eq!(all, TypeFilter::All);
/// assert_eq!(mocks, TypeFilter::Type("Mock".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeFilter {
    /// Include every record.
    All,
    /// Include only records whose `test_type` equals this string exactly.
    Type(String),
}

impl TypeFilter {
    /// Returns `true` if the given record passes this filter.
    pub fn matches(&self, record: &TestRecord) -> bool {
        match self {
            Self::All => true,
            Self::Type(t) => record.test_type == *t,
        }
    }
}

impl From<&str> for TypeFilter {
    /// `"all"` selects everything; any other string is an exact type match.
    fn from(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Type(value.to_string())
        }
    }
}

impl From<String> for TypeFilter {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Ordering applied to a history view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Keep the store's order: descending by id, newest first. No re-sort.
    #[default]
    Newest,
    /// Descending by score.
    Score,
    /// Ascending by rank (a lower rank number is better).
    Rank,
}

impl SortMode {
    /// Returns the UI-facing string for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Score => "score",
            Self::Rank => "rank",
        }
    }
}

impl FromStr for SortMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "score" => Ok(Self::Score),
            "rank" => Ok(Self::Rank),
            other => Err(ValidationError::invalid_field(
                "sort_mode",
                format!("expected one of newest/score/rank, got '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordInput;
    use crate::types::RecordId;

    fn record_of_type(test_type: &str) -> TestRecord {
        TestRecord::from_input(
            RecordId::from_millis(1),
            RecordInput {
                test_type: test_type.into(),
                ..Default::default()
            },
            120,
        )
    }

    #[test]
    fn test_all_matches_everything() {
        let filter = TypeFilter::All;
        assert!(filter.matches(&record_of_type("Mock")));
        assert!(filter.matches(&record_of_type("")));
    }

    #[test]
    fn test_type_match_is_exact() {
        let filter: TypeFilter = "Mock".into();
        assert!(filter.matches(&record_of_type("Mock")));
        assert!(!filter.matches(&record_of_type("mock")));
        assert!(!filter.matches(&record_of_type("Mock Test")));
    }

    #[test]
    fn test_sort_mode_round_trips_through_str() {
        for mode in [SortMode::Newest, SortMode::Score, SortMode::Rank] {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_sort_mode_rejected() {
        assert!("percentile".parse::<SortMode>().is_err());
    }
}
