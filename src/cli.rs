//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for regdesk using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive list session (default)
//! - **list** / **search**: Print one page of registrations
//! - **show** / **stats**: Inspect a registration or the summary counts
//! - **pay** / **toggle** / **edit** / **delete**: Change registrations
//! - **export** / **import**: Move registrations in and out as CSV or JSON
//!
//! Global flags: `--db` to pick a database directory, `--quiet` for
//! scripting-friendly output and `-v` (repeatable) for log verbosity.

use crate::model::FlagField;
use crate::view::{PAGE_SIZES, SearchField};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Input format for the import command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportFormat {
    /// A JSON array of registrations
    #[default]
    Json,
    /// A CSV file as written by `export`
    Csv,
}

/// Parse a page size, accepting only the sizes the list offers
fn parse_page_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {PAGE_SIZES:?}"))
    }
}

/// Page selection shared by `list` and `search`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PageArgs {
    /// Page to show (clamped to the last page)
    #[arg(short = 'p', long = "page", default_value_t = 1)]
    pub page: usize,

    /// Registrations per page (overrides config)
    #[arg(short = 'n', long = "page-size", value_parser = parse_page_size)]
    pub page_size: Option<usize>,
}

impl Default for PageArgs {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "regdesk")]
#[command(about = "Browse and manage event registrations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database directory (overrides config)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Page through and manage registrations interactively (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Registrations per page (overrides config)
        #[arg(short = 'n', long = "page-size", value_parser = parse_page_size)]
        page_size: Option<usize>,
    },

    /// Print one page of registrations in name order
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Search registrations and print one page of matches
    #[command(visible_alias = "s")]
    Search {
        /// Text to look for
        #[arg(value_name = "TERM")]
        term: String,

        /// Field to search (all, name, email, nickname, contact, church, membership, address)
        #[arg(short = 'f', long = "field", default_value = "all")]
        field: SearchField,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Show every field of one registration
    Show {
        #[arg(value_name = "ID")]
        id: String,

        /// Print the stored JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Print total, paid and membership counts
    Stats,

    /// Write all registrations to registrations_<date>.csv
    Export {
        /// Output directory (overrides config)
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Add registrations from a JSON or CSV file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long = "format", value_enum, default_value_t = ImportFormat::Json)]
        format: ImportFormat,
    },

    /// Toggle the payment status of a registration
    Pay {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Toggle an accommodation flag (plate, spoon, glass, beddings)
    Toggle {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(value_name = "FLAG")]
        flag: FlagField,
    },

    /// Set fields of a registration; an empty value clears the field
    Edit {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(value_name = "FIELD=VALUE", required = true, num_args = 1..)]
        assignments: Vec<String>,
    },

    /// Delete a registration
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(value_name = "ID")]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { page_size: None })
    }
}
