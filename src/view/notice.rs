//! User-facing notifications
//!
//! Action handlers report their outcome as a [`Notice`], the non-blocking
//! toast the presentation layer shows after a mutation, an export or a failed
//! fetch.

use super::error::ViewError;
use std::fmt;
use tracing::error;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Outcome message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Log a failed action and describe it for the user
    ///
    /// `failed` is the message used for write failures, e.g. "Failed to delete registration."
    #[must_use]
    pub fn from_error(err: &ViewError, failed: &str) -> Self {
        error!(error = %err, "{failed}");
        match err {
            ViewError::EmptyExportFailure => {
                Self::error("No Data", "There are no registrations to export.")
            }
            ViewError::FetchFailure(_) => Self::error("Error", "Failed to load registrations."),
            ViewError::InvalidPageSize(size) => {
                Self::error("Error", format!("Page size must be at least 1 (got {size})."))
            }
            ViewError::WriteFailure(_) | ViewError::Export(_) | ViewError::Io(_) => {
                Self::error("Error", failed)
            }
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::model::RecordId;

    #[test]
    fn test_write_failure_uses_action_message() {
        let err = ViewError::WriteFailure(DbError::NotFound(RecordId::new("x")));
        let notice = Notice::from_error(&err, "Failed to delete registration.");

        assert!(notice.is_error());
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.message, "Failed to delete registration.");
    }

    #[test]
    fn test_empty_export_notice() {
        let notice = Notice::from_error(&ViewError::EmptyExportFailure, "Failed to export.");
        assert_eq!(notice.title, "No Data");
        assert_eq!(notice.message, "There are no registrations to export.");
    }

    #[test]
    fn test_display() {
        let notice = Notice::success("Registration updated successfully!");
        assert!(!notice.is_error());
        assert_eq!(notice.to_string(), "Success: Registration updated successfully!");
    }
}
