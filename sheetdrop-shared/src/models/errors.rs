//! The backend's error body.

use serde::{Deserialize, Serialize};

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The main error message.
    pub message: String,
    /// Optional additional details about the error.
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_details() {
        let error = ErrorResponse::new("Import failed");
        assert_eq!(error.to_string(), "Import failed");
    }

    #[test]
    fn test_parse_backend_body() {
        let error: ErrorResponse =
            serde_json::from_str(r#"{"message": "Invalid file", "details": "row 3"}"#).unwrap();

        assert_eq!(error.to_string(), "Invalid file: row 3");
    }
}
