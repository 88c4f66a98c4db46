//! Backup serialization: export snapshots and import parsing.
//!
//! Exports are indented JSON arrays of records, readable and diffable.
//! Imports accept only a top-level JSON array; elements must be
//! record-shaped but their values are trusted as-is (no re-validation of
//! the question cap or anything else — the source file is the user's own
//! backup).

use serde_json::Value;
use tracing::debug;

use crate::error::ImportError;
use crate::record::TestRecord;

/// Serializes records as an indented JSON array.
///
/// The output round-trips through [`parse_import`] field-for-field.
pub fn export_snapshot(records: &[TestRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Returns the conventional backup filename for today.
///
/// Format: `performance_backup_<YYYY-MM-DD>.json`, UTC date.
pub fn backup_file_name() -> String {
    format!(
        "performance_backup_{}.json",
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

/// Parses imported backup data into records.
///
/// # Errors
///
/// - [`ImportError::InvalidJson`] if the data isn't JSON at all
/// - [`ImportError::NotAnArray`] if the top-level value isn't an array
/// - [`ImportError::MalformedRecord`] if an element isn't record-shaped
pub fn parse_import(data: &str) -> Result<Vec<TestRecord>, ImportError> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let Value::Array(elements) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let record: TestRecord =
            serde_json::from_value(element).map_err(|e| ImportError::MalformedRecord {
                index,
                reason: e.to_string(),
            })?;
        records.push(record);
    }

    debug!(count = records.len(), "Parsed import data");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordInput;
    use crate::types::RecordId;

    fn sample_records() -> Vec<TestRecord> {
        vec![
            TestRecord::from_input(
                RecordId::from_millis(2),
                RecordInput {
                    test_name: "Mock 2".into(),
                    test_type: "Mock".into(),
                    score: 182.5,
                    total_score: 300.0,
                    rank: 42,
                    total_students: 12000,
                    percentile: 99.2,
                    accuracy: 87.5,
                    correct: 87,
                    incorrect: 13,
                },
                120,
            ),
            TestRecord::from_input(
                RecordId::from_millis(1),
                RecordInput {
                    test_name: "Mock 1".into(),
                    test_type: "Mock".into(),
                    score: 140.0,
                    ..Default::default()
                },
                120,
            ),
        ]
    }

    #[test]
    fn test_export_is_indented_array() {
        let out = export_snapshot(&sample_records()).unwrap();
        assert!(out.starts_with("[\n"));
        assert!(out.contains("  {"));
        assert!(out.contains("\"testName\": \"Mock 2\""));
    }

    #[test]
    fn test_round_trip_is_identical() {
        let records = sample_records();
        let out = export_snapshot(&records).unwrap();
        let back = parse_import(&out).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_backup_file_name_shape() {
        let name = backup_file_name();
        assert!(name.starts_with("performance_backup_"));
        assert!(name.ends_with(".json"));
        // performance_backup_YYYY-MM-DD.json
        assert_eq!(name.len(), "performance_backup_0000-00-00.json".len());
    }

    #[test]
    fn test_non_json_rejected() {
        assert!(matches!(
            parse_import("definitely not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_non_array_rejected() {
        assert!(matches!(
            parse_import("{\"records\": []}"),
            Err(ImportError::NotAnArray)
        ));
    }

    #[test]
    fn test_malformed_element_rejected_with_index() {
        let data = "[{\"id\": 1}]";
        match parse_import(data) {
            Err(ImportError::MalformedRecord { index, .. }) => assert_eq!(index, 0),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_array_imports_empty() {
        assert_eq!(parse_import("[]").unwrap(), Vec::new());
    }
}
