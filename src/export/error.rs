//! Export and import error types

use crate::model::ModelError;
use thiserror::Error;

/// Errors producing or reading a registrations CSV
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer or reader failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to write the export file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// There is nothing to export
    #[error("No registrations to export")]
    Empty,

    /// Header row does not match the export columns
    #[error("Unexpected CSV header: {0}")]
    HeaderMismatch(String),

    /// Row has the wrong number of cells
    #[error("Row {row} has {found} columns, expected {expected}")]
    MalformedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Cell could not be mapped back onto its field
    #[error("Invalid cell: {0}")]
    Model(#[from] ModelError),

    /// Writer produced bytes that are not UTF-8
    #[error("Export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
