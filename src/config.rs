//! Application configuration and directory layout.
//!
//! The config file is TOML with three sections:
//!
//! ```toml
//! [crawl]
//! seed_url = "https://www.cpp.edu/sci/biological-sciences/index.shtml"
//! concurrency = 4
//!
//! [rank]
//! page_size = 5
//!
//! [store]
//! database_path = "/var/lib/faculty-finder/faculty.db"
//! ```
//!
//! Every field has a default, so an empty file is valid.
//!
//! # Environment Overrides
//!
//! - `FACULTY_FINDER_CONFIG_DIR` overrides [`config_dir`]
//! - `FACULTY_FINDER_DATA_DIR` overrides [`data_dir`]

use std::path::{Path, PathBuf};

use faculty_search::{CrawlConfig, RankConfig};
use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};

const APP_DIR: &str = "faculty-finder";
const CONFIG_FILENAME: &str = "config.toml";
const DB_FILENAME: &str = "faculty.db";

/// Application data directory, home of the record database.
///
/// Resolves to `dirs::data_dir()/faculty-finder/` unless
/// `FACULTY_FINDER_DATA_DIR` is set.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("FACULTY_FINDER_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/faculty-finder-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/faculty-finder/` unless
/// `FACULTY_FINDER_CONFIG_DIR` is set.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("FACULTY_FINDER_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/faculty-finder-config"))
}

/// Record store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: data_dir().join(DB_FILENAME),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Discovery and extraction.
    pub crawl: CrawlConfig,
    /// Ranking and presentation.
    pub rank: RankConfig,
    /// Persistence.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| FinderError::Config(e.to_string()))
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be parsed. An explicit
    /// `path` that does not exist is also an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FinderError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `config_dir()/config.toml`.
    pub fn default_config_path() -> PathBuf {
        config_dir().join(CONFIG_FILENAME)
    }

    /// Validate the crawl and rank sections.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        self.crawl.validate()?;
        self.rank.validate()?;
        if self.store.database_path.as_os_str().is_empty() {
            return Err(FinderError::Config("database_path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.store.database_path.ends_with(DB_FILENAME));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").expect("parse empty");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [crawl]
            concurrency = 8
            personal_page_pattern = "cpp.edu/faculty/"

            [rank]
            page_size = 10
            "#,
        )
        .expect("parse partial");
        assert_eq!(config.crawl.concurrency, 8);
        assert_eq!(config.crawl.personal_page_pattern.as_deref(), Some("cpp.edu/faculty/"));
        assert_eq!(config.crawl.timeout_seconds, 10);
        assert_eq!(config.rank.page_size, 10);
        assert_eq!(config.rank.max_features, 5000);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let path = dir.path().join("nested").join(CONFIG_FILENAME);
        let mut config = AppConfig::default();
        config.crawl.concurrency = 2;
        config.store.database_path = dir.path().join("x.db");

        config.save_to_file(&path).expect("save");
        let loaded = AppConfig::from_file(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = AppConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(FinderError::Io(_))));
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").expect("write");
        assert!(matches!(AppConfig::from_file(&path), Err(FinderError::Config(_))));
    }

    #[test]
    fn load_with_explicit_missing_path_errors() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = AppConfig::default_config_path();
        assert!(path.ends_with(CONFIG_FILENAME));
    }

    #[test]
    fn invalid_rank_section_rejected() {
        let mut config = AppConfig::default();
        config.rank.page_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }
}
