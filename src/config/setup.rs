//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when regdesk is run for the first time.

use super::RegdeskConfig;
use crate::view::PAGE_SIZES;
use config::ConfigError;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for database location and page size
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<RegdeskConfig, ConfigError> {
    println!("Welcome to regdesk! Let's set up your registration database.\n");

    let mut config = RegdeskConfig::default();
    let theme = ColorfulTheme::default();

    let db_path: String = Input::with_theme(&theme)
        .with_prompt("Database location")
        .default(config.database.to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;
    config.database = PathBuf::from(db_path);

    let sizes: Vec<String> = PAGE_SIZES.iter().map(ToString::to_string).collect();
    let default_index = PAGE_SIZES
        .iter()
        .position(|size| *size == config.page_size)
        .unwrap_or_default();
    let choice = Select::with_theme(&theme)
        .with_prompt("Registrations per page")
        .items(&sizes)
        .default(default_index)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;
    config.page_size = PAGE_SIZES[choice];

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
