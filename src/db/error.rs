//! Database-specific error types
//!
//! This module defines all error types that can occur during store operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing a stored registration
//! - **`EncodeError`**: Failures when serializing a registration
//! - **`SerializeError`**: Malformed index keys
//! - **`NotFound`**: Update or delete addressed a record that does not exist
//! - **`Unavailable`**: The store refused to serve the request
//!
//! A failed multi-tree transaction surfaces as its abort reason or as a
//! `SledError`.
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use crate::model::{ModelError, RecordId};
use sled::transaction::TransactionError;
use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Malformed index key
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// No record with this id
    #[error("Registration not found: {0}")]
    NotFound(RecordId),

    /// Patch could not be applied
    #[error("Invalid update: {0}")]
    InvalidInput(#[from] ModelError),

    /// Store is not reachable or refused the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<TransactionError<DbError>> for DbError {
    fn from(error: TransactionError<DbError>) -> Self {
        match error {
            TransactionError::Abort(inner) => inner,
            TransactionError::Storage(inner) => Self::SledError(inner),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
