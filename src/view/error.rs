//! List view error types
//!
//! Every failure an action handler can run into falls into one of these
//! categories. None of them is fatal: the handler logs the error, turns it into
//! a [`Notice`](super::Notice) and the view stays usable.
//!
//! # Error Types
//!
//! - **`FetchFailure`**: Reading a page, the count or the snapshot failed
//! - **`WriteFailure`**: An update or delete was rejected by the store
//! - **`EmptyExportFailure`**: Export was requested with no registrations
//! - **`InvalidPageSize`**: A page size of zero was requested
//! - **`Export`** / **`Io`**: The CSV could not be produced or written

use crate::db::DbError;
use crate::export::ExportError;
use thiserror::Error;

/// List view errors
#[derive(Debug, Error)]
pub enum ViewError {
    /// Store read failed
    #[error("Failed to fetch registrations: {0}")]
    FetchFailure(#[source] DbError),

    /// Store write failed
    #[error("Failed to write registration: {0}")]
    WriteFailure(#[source] DbError),

    /// Nothing to export
    #[error("There are no registrations to export")]
    EmptyExportFailure,

    /// Page size must be at least one
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// CSV serialization failed
    #[error("Export error: {0}")]
    Export(ExportError),

    /// Writing the export file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for ViewError {
    fn from(error: ExportError) -> Self {
        match error {
            ExportError::Empty => Self::EmptyExportFailure,
            other => Self::Export(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
