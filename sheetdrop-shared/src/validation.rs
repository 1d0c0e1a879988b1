//! Client-side checks applied before an upload is allowed to start.
//!
//! A rejected file never reaches the network; the messages here are shown
//! to the user as a blocking dialog.

use thiserror::Error;

/// MIME type of `.xlsx` workbooks.
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME type of legacy `.xls` workbooks.
pub const MIME_XLS: &str = "application/vnd.ms-excel";

/// Upload size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Reasons a file is refused before upload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileValidationError {
    #[error("Only .xlsx and .xls files are accepted (got \"{0}\")")]
    UnsupportedType(String),
    #[error("The file exceeds the 10 MiB limit ({0} bytes)")]
    TooLarge(u64),
}

/// Validate a candidate upload by MIME type and size.
///
/// Type is checked first so an oversized text file reports the more useful
/// "wrong kind of file" message.
pub fn validate_upload(mime: &str, size: u64) -> Result<(), FileValidationError> {
    if mime != MIME_XLSX && mime != MIME_XLS {
        return Err(FileValidationError::UnsupportedType(mime.to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(FileValidationError::TooLarge(size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_excel_types() {
        assert!(validate_upload(MIME_XLSX, 1_024).is_ok());
        assert!(validate_upload(MIME_XLS, 1_024).is_ok());
    }

    #[test]
    fn test_rejects_csv() {
        let err = validate_upload("text/csv", 1_024).unwrap_err();
        assert!(matches!(err, FileValidationError::UnsupportedType(_)));
        assert!(err.to_string().contains(".xlsx"));
        assert!(err.to_string().contains(".xls"));
    }

    #[test]
    fn test_rejects_oversized_workbook() {
        let size = 11 * 1024 * 1024;
        let err = validate_upload(MIME_XLSX, size).unwrap_err();
        assert_eq!(err, FileValidationError::TooLarge(size));
        assert!(err.to_string().contains("10 MiB"));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_upload(MIME_XLSX, MAX_UPLOAD_BYTES).is_ok());
        assert!(validate_upload(MIME_XLSX, MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn test_oversized_wrong_type_reports_the_type() {
        // Type wins when both checks would fail.
        let err = validate_upload("text/csv", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, FileValidationError::UnsupportedType(_)));
    }
}
