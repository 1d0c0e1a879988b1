//! Import outcomes, upload history, and parsing configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::Timestamp;

/// One rejected row from a processed spreadsheet, rendered verbatim.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ImportError {
    /// 1-based spreadsheet row.
    pub line: u32,
    /// Column the value came from.
    pub column: String,
    /// What the backend objected to.
    pub error: String,
    /// The offending cell value, verbatim.
    pub value: String,
}

/// Outcome of one import as reported by the backend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// The backend's overall verdict.
    pub success: bool,
    /// Rows found in the spreadsheet.
    pub total_rows: u32,
    /// Rows actually persisted.
    pub imported_rows: u32,
    /// Per-row rejections; absent on the wire means none.
    #[serde(default)]
    pub errors: Vec<ImportError>,
}

/// Terminal status of a past upload attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Success,
    Error,
    Processing,
}

/// One line of the persisted upload log, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Locally generated identity; the backend never sees history.
    pub id: Uuid,
    /// Uploaded file name.
    pub name: String,
    /// Uploaded file size in bytes.
    pub size: u64,
    /// When the upload finished.
    pub date: Timestamp,
    /// Terminal outcome of the attempt.
    pub status: ImportStatus,
    /// Rows found, when the backend produced a verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u32>,
    /// Rows persisted, when the backend produced a verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_rows: Option<u32>,
    /// Number of per-row rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_count: Option<u32>,
}

impl HistoryEntry {
    /// Record a completed upload. Status follows the backend's own verdict,
    /// not the transport outcome.
    #[must_use]
    pub fn from_result(name: impl Into<String>, size: u64, result: &ImportResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size,
            date: Timestamp::now(),
            status: if result.success {
                ImportStatus::Success
            } else {
                ImportStatus::Error
            },
            total_rows: Some(result.total_rows),
            imported_rows: Some(result.imported_rows),
            error_count: Some(result.errors.len() as u32),
        }
    }

    /// Record an upload that never produced a backend verdict, so no row
    /// statistics are available.
    #[must_use]
    pub fn from_failure(name: impl Into<String>, size: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size,
            date: Timestamp::now(),
            status: ImportStatus::Error,
            total_rows: None,
            imported_rows: None,
            error_count: None,
        }
    }
}

/// Which character the spreadsheet uses as the decimal separator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecimalSeparator {
    #[default]
    Dot,
    Comma,
}

impl DecimalSeparator {
    /// The literal separator character.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }
}

/// User-tunable parsing hints forwarded to the backend, persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportConfig {
    /// chrono-style format string for date cells.
    pub date_format: String,
    /// Decimal separator used in numeric cells.
    pub decimal_separator: DecimalSeparator,
    /// Target field to source column overrides.
    pub column_mapping: HashMap<String, String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".to_string(),
            decimal_separator: DecimalSeparator::Dot,
            column_mapping: HashMap::new(),
        }
    }
}

/// Fraction of the payload sent so far, as a whole percentage in [0, 100].
///
/// An unknown total reports 0 rather than a bogus figure.
#[must_use]
pub fn progress_percent(loaded: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    let percent = (loaded / total * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(success: bool, error_count: usize) -> ImportResult {
        ImportResult {
            success,
            total_rows: 50,
            imported_rows: 48,
            errors: (0..error_count)
                .map(|i| ImportError {
                    line: i as u32 + 1,
                    column: "email".to_string(),
                    error: "invalid".to_string(),
                    value: "x".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_result_parses_camel_case_wire_names() {
        let result: ImportResult = serde_json::from_str(
            r#"{"success": true, "totalRows": 50, "importedRows": 48,
                "errors": [{"line": 3, "column": "dob", "error": "bad date", "value": "31/31"}]}"#,
        )
        .unwrap();

        assert_eq!(result.total_rows, 50);
        assert_eq!(result.imported_rows, 48);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_result_without_errors_field() {
        let result: ImportResult =
            serde_json::from_str(r#"{"success": true, "totalRows": 10, "importedRows": 10}"#)
                .unwrap();

        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_entry_from_successful_result() {
        let entry = HistoryEntry::from_result("data.xlsx", 2_048, &sample_result(true, 2));

        assert_eq!(entry.status, ImportStatus::Success);
        assert_eq!(entry.total_rows, Some(50));
        assert_eq!(entry.imported_rows, Some(48));
        assert_eq!(entry.error_count, Some(2));
    }

    #[test]
    fn test_entry_from_rejected_result() {
        // Backend answered but reported failure: still carries row counts.
        let entry = HistoryEntry::from_result("data.xlsx", 2_048, &sample_result(false, 0));

        assert_eq!(entry.status, ImportStatus::Error);
        assert_eq!(entry.error_count, Some(0));
        assert_eq!(entry.total_rows, Some(50));
    }

    #[test]
    fn test_entry_from_transport_failure() {
        let entry = HistoryEntry::from_failure("data.xlsx", 2_048);

        assert_eq!(entry.status, ImportStatus::Error);
        assert_eq!(entry.total_rows, None);
        assert_eq!(entry.imported_rows, None);
        assert_eq!(entry.error_count, None);
    }

    #[test]
    fn test_history_round_trip_preserves_order_and_dates() {
        let older = HistoryEntry::from_failure("a.xlsx", 1);
        let newer = HistoryEntry::from_result("b.xlsx", 2, &sample_result(true, 1));
        let history = vec![newer.clone(), older.clone()];

        let json = serde_json::to_string(&history).unwrap();
        let restored: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, history);
        assert_eq!(restored[0].date, newer.date);
        assert_eq!(restored[1].date, older.date);
    }

    #[test]
    fn test_config_defaults() {
        let config = ImportConfig::default();

        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.decimal_separator.as_char(), '.');
        assert!(config.column_mapping.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(progress_percent(0.0, 100.0), 0);
        assert_eq!(progress_percent(50.0, 100.0), 50);
        assert_eq!(progress_percent(100.0, 100.0), 100);
        assert_eq!(progress_percent(150.0, 100.0), 100);
        assert_eq!(progress_percent(-1.0, 100.0), 0);
    }

    #[test]
    fn test_progress_with_unknown_total() {
        assert_eq!(progress_percent(1_024.0, 0.0), 0);
    }

    #[test]
    fn test_progress_is_monotonic_over_a_transfer() {
        let total = 10_485_760.0;
        let mut last = 0;
        for step in 0..=64 {
            let loaded = total * f64::from(step) / 64.0;
            let percent = progress_percent(loaded, total);
            assert!(percent >= last);
            last = percent;
        }
        assert_eq!(last, 100);
    }
}
