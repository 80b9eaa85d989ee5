//! Unit tests for list view error types

#[cfg(test)]
mod tests {
    use crate::db::DbError;
    use crate::export::ExportError;
    use crate::model::RecordId;
    use crate::view::error::ViewError;
    use std::error::Error;

    #[test]
    fn test_empty_export_error() {
        let error = ViewError::EmptyExportFailure;
        assert_eq!(error.to_string(), "There are no registrations to export");
    }

    #[test]
    fn test_write_failure_keeps_source() {
        let error = ViewError::WriteFailure(DbError::NotFound(RecordId::new("abc")));
        assert_eq!(
            error.to_string(),
            "Failed to write registration: Registration not found: abc"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn test_empty_export_error_conversion() {
        let error: ViewError = ExportError::Empty.into();
        assert!(matches!(error, ViewError::EmptyExportFailure));
    }

    #[test]
    fn test_other_export_errors_are_wrapped() {
        let error: ViewError = ExportError::HeaderMismatch("Name".to_string()).into();
        assert!(matches!(error, ViewError::Export(_)));
    }

    #[test]
    fn test_invalid_page_size_error() {
        let error = ViewError::InvalidPageSize(0);
        assert_eq!(error.to_string(), "Invalid page size: 0");
    }
}
