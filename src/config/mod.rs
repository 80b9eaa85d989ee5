//! Configuration module for regdesk
//!
//! Manages the database location, list defaults and export directory.
//! Configuration is stored in the user's config directory and can be
//! overridden by `REGDESK_*` environment variables.

mod setup;

pub use setup::first_time_setup;

use crate::view::{DEFAULT_CURSOR_CAPACITY, DEFAULT_PAGE_SIZE, PAGE_SIZES};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables overriding the config file
pub const ENV_PREFIX: &str = "REGDESK";

fn default_database() -> PathBuf {
    dirs::data_local_dir()
        .map_or_else(|| PathBuf::from("regdesk-db"), |dir| dir.join("regdesk").join("db"))
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_cursor_capacity() -> usize {
    DEFAULT_CURSOR_CAPACITY
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RegdeskConfig {
    /// Directory of the registration database
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Registrations shown per page (one of 5, 10, 20, 50)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Number of page cursors kept while browsing
    #[serde(default = "default_cursor_capacity")]
    pub cursor_capacity: usize,

    /// Where exports are written (current directory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for RegdeskConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            page_size: DEFAULT_PAGE_SIZE,
            cursor_capacity: DEFAULT_CURSOR_CAPACITY,
            export_dir: None,
            quiet: false,
        }
    }
}

impl RegdeskConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("regdesk").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or holds invalid values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the deserializer cannot
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the page size is not one of the offered sizes
    /// or the cursor capacity is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(ConfigError::Message(format!(
                "page_size must be one of {PAGE_SIZES:?}, got {}",
                self.page_size
            )));
        }
        if self.cursor_capacity == 0 {
            return Err(ConfigError::Message(
                "cursor_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Directory exports go to
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// In quiet mode the defaults are written without prompting.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup(quiet: bool) -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() || quiet {
            Self::load()
        } else {
            first_time_setup()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RegdeskConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.cursor_capacity, 16);
        assert!(config.export_dir.is_none());
        assert!(!config.quiet);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = RegdeskConfig {
            database: PathBuf::from("/tmp/regdesk-test-db"),
            page_size: 20,
            cursor_capacity: 4,
            export_dir: Some(PathBuf::from("/tmp/exports")),
            quiet: true,
        };

        config.save_to(&path).unwrap();
        let loaded = RegdeskConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 50\n").unwrap();

        let loaded = RegdeskConfig::load_from(&path).unwrap();

        assert_eq!(loaded.page_size, 50);
        assert_eq!(loaded.cursor_capacity, DEFAULT_CURSOR_CAPACITY);
        assert_eq!(loaded.database, default_database());
    }

    #[test]
    fn test_rejects_unsupported_page_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 7\n").unwrap();

        let err = RegdeskConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_rejects_zero_cursor_capacity() {
        let config = RegdeskConfig {
            cursor_capacity: 0,
            ..RegdeskConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_dir_defaults_to_current_directory() {
        assert_eq!(RegdeskConfig::default().export_dir(), PathBuf::from("."));
    }
}
