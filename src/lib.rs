//! Regdesk - browse, search and export event registrations
//!
//! This library provides the registration list view: keyset pagination over
//! an embedded store, client-side search over a snapshot, projection into a
//! displayable page and CSV export.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod export;
pub mod model;
pub mod output;
pub mod stats;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RegdeskError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Malformed field, flag or assignment
    #[error("Invalid value: {0}")]
    ModelError(#[from] model::ModelError),
    /// CSV export or import error
    #[error("Export error: {0}")]
    ExportError(#[from] export::ExportError),
    /// List view error
    #[error("{0}")]
    ViewError(#[from] view::ViewError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// JSON import or output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// An action reported a failure notice
    #[error("{0}")]
    ActionFailed(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
