//! Structured errors for the outer layers (config, snapshot sources, CLI).
//!
//! The analytics core never fails; malformed input degrades to defaults.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    InvalidFieldValue,
    UnknownCategory,

    // Source errors
    SnapshotNotFound,
    SnapshotUnreadable,

    // Internal errors
    InternalError,
}

/// Structured error carrying a code and optional field context.
#[derive(Debug, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct InsightError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl InsightError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn unknown_category(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownCategory,
            format!(
                "Unknown category: {} (expected to-do, in-progress, completed or closed)",
                name
            ),
        )
        .with_field("category")
    }

    pub fn snapshot_not_found(list_id: &str) -> Self {
        Self::new(
            ErrorCode::SnapshotNotFound,
            format!("No snapshot found for list {}", list_id),
        )
    }

    pub fn snapshot_unreadable(list_id: &str, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::SnapshotUnreadable,
            format!("Snapshot for list {} could not be read", list_id),
        )
        .with_details(err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

/// Result type for fallible outer-layer operations.
pub type InsightResult<T> = std::result::Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_code_and_field() {
        let err = InsightError::invalid_value("from", "expected YYYY-MM-DD");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_FIELD_VALUE");
        assert_eq!(json["field"], "from");
        assert!(json.get("details").is_none());
        assert_eq!(err.to_string(), "expected YYYY-MM-DD");
    }

    #[test]
    fn test_snapshot_unreadable_keeps_details() {
        let err = InsightError::snapshot_unreadable("42", "bad json");
        assert_eq!(err.code, ErrorCode::SnapshotUnreadable);
        assert_eq!(err.details.as_deref(), Some("bad json"));
    }
}
