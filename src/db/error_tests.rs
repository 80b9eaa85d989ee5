//! Unit tests for database error types

#[cfg(test)]
mod tests {
    use crate::db::error::DbError;
    use crate::model::{ModelError, RecordId};
    use std::error::Error;

    #[test]
    fn test_not_found_error() {
        let error = DbError::NotFound(RecordId::new("abc123"));
        assert_eq!(error.to_string(), "Registration not found: abc123");
    }

    #[test]
    fn test_serialize_error() {
        let error = DbError::SerializeError("Index key without separator".to_string());
        assert_eq!(
            error.to_string(),
            "Error during serialization: Index key without separator"
        );
    }

    #[test]
    fn test_invalid_input_wraps_model_error() {
        let error: DbError = ModelError::InvalidFlag("maybe".to_string()).into();
        assert!(matches!(error, DbError::InvalidInput(_)));
        assert_eq!(error.to_string(), "Invalid update: Invalid flag value: 'maybe'");
    }

    #[test]
    fn test_transaction_abort_keeps_reason() {
        use sled::transaction::TransactionError;

        let error: DbError = TransactionError::Abort(DbError::NotFound(RecordId::new("gone"))).into();
        assert!(matches!(error, DbError::NotFound(ref id) if id.as_str() == "gone"));

        let error: DbError = TransactionError::<DbError>::Storage(sled::Error::Unsupported("x".into())).into();
        assert!(matches!(error, DbError::SledError(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = DbError::Unavailable("offline".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Unavailable"));
        assert!(debug.contains("offline"));
    }

    #[test]
    fn test_error_source() {
        let error = DbError::NotFound(RecordId::new("x"));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_not_found_error_creation() {
        let error = DbError::NotFound(RecordId::new("missing"));

        match error {
            DbError::NotFound(id) => assert_eq!(id.as_str(), "missing"),
            _ => panic!("Expected NotFound variant"),
        }
    }
}
