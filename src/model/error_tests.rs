//! Unit tests for model error types

#[cfg(test)]
mod tests {
    use crate::model::error::ModelError;
    use std::error::Error;

    #[test]
    fn test_unknown_field_error() {
        let error = ModelError::UnknownField("shoe_size".to_string());
        assert_eq!(error.to_string(), "Unknown field: shoe_size");
    }

    #[test]
    fn test_invalid_flag_error() {
        let error = ModelError::InvalidFlag("maybe".to_string());
        assert_eq!(error.to_string(), "Invalid flag value: 'maybe'");
    }

    #[test]
    fn test_invalid_assignment_error() {
        let error = ModelError::InvalidAssignment("pangalan".to_string());
        let display = error.to_string();
        assert!(display.contains("pangalan"));
        assert!(display.contains("FIELD=VALUE"));
    }

    #[test]
    fn test_error_source() {
        let error = ModelError::InvalidPaymentStatus("pending".to_string());
        assert!(error.source().is_none());
    }
}
