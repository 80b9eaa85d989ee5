//! Model-level error types
//!
//! Raised when text coming from the command line, a patch or an imported CSV
//! cannot be mapped onto a registration field.

use thiserror::Error;

/// Errors converting text into registration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Field name is not one of the registration attributes
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Field name is not one of the accommodation flags
    #[error("Not a flag field: {0}")]
    NotAFlag(String),

    /// Field name is not one of the searchable fields
    #[error("Unknown search field: {0}")]
    UnknownSearchField(String),

    /// Flag value was not `true`/`false` (or `Yes`/`No` in exports)
    #[error("Invalid flag value: '{0}'")]
    InvalidFlag(String),

    /// Payment status was not `paid`/`unpaid` (or `Paid`/`Unpaid` in exports)
    #[error("Invalid payment status: '{0}'")]
    InvalidPaymentStatus(String),

    /// Assignment was not of the form `FIELD=VALUE`
    #[error("Invalid assignment '{0}', expected FIELD=VALUE")]
    InvalidAssignment(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
