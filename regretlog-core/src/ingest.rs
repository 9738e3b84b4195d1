//! Ingestion of conversation record files
//!
//! Record files are parsed once, in full, into memory. Two layouts are
//! supported:
//!
//! - `.json`: a single JSON array of records
//! - `.jsonl`: one record per line, blank lines ignored
//!
//! Validation is strict. Unlike a best-effort log reader, a single malformed
//! record aborts the load with [`Error::MalformedRecord`], since partial
//! aggregation over a subset of records would silently skew every ratio.

use crate::error::{Error, Result};
use crate::types::ConversationRecord;
use std::path::Path;

/// Load every record from a record file.
///
/// The layout is picked from the file extension; anything other than
/// `.jsonl` is read as a JSON array.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ConversationRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let is_jsonl = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("jsonl"))
        .unwrap_or(false);

    let records = if is_jsonl {
        parse_records_jsonl(&content)?
    } else {
        parse_records(&content)?
    };

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Loaded conversation records"
    );

    Ok(records)
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<ConversationRecord>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| Error::MalformedRecord {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Parse newline-delimited JSON records.
pub fn parse_records_jsonl(content: &str) -> Result<Vec<ConversationRecord>> {
    let mut records = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = serde_json::from_str(line).map_err(|e| Error::MalformedRecord {
            index: records.len(),
            message: format!("line {}: {}", line_idx + 1, e),
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    const GOOD: &str = r#"{"startTime": 1400000000000, "userID1": 1, "userID2": 2, "user1Clicked": true, "user2Clicked": true, "user1MessagesSent": 4, "user2MessagesSent": 5}"#;
    const NO_CLICK_FIELD: &str = r#"{"startTime": 1400000000000, "userID1": 1, "userID2": 2, "user1Clicked": true, "user1MessagesSent": 4, "user2MessagesSent": 5}"#;

    #[test]
    fn test_parse_array() {
        let json = format!("[{GOOD}, {GOOD}]");
        let records = parse_records(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user_id2, UserId::Number(2));
    }

    #[test]
    fn test_empty_array_is_not_an_error() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_record_reports_index() {
        let json = format!("[{GOOD}, {NO_CLICK_FIELD}, {GOOD}]");
        match parse_records(&json) {
            Err(Error::MalformedRecord { index, message }) => {
                assert_eq!(index, 1);
                assert!(message.contains("user2Clicked"), "message: {message}");
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_non_array_is_json_error() {
        assert!(matches!(parse_records(GOOD), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_jsonl_skips_blank_lines() {
        let content = format!("{GOOD}\n\n{GOOD}\n");
        assert_eq!(parse_records_jsonl(&content).unwrap().len(), 2);

        let content = format!("{GOOD}\n\n{NO_CLICK_FIELD}\n");
        match parse_records_jsonl(&content) {
            Err(Error::MalformedRecord { index, message }) => {
                assert_eq!(index, 1);
                assert!(message.starts_with("line 3:"), "message: {message}");
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_load_records_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("records.json");
        std::fs::write(&json_path, format!("[{GOOD}]")).unwrap();
        assert_eq!(load_records(&json_path).unwrap().len(), 1);

        let jsonl_path = dir.path().join("records.jsonl");
        std::fs::write(&jsonl_path, format!("{GOOD}\n{GOOD}\n")).unwrap();
        assert_eq!(load_records(&jsonl_path).unwrap().len(), 2);

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_records(&missing), Err(Error::Io(_))));
    }
}
