//! Configuration management and validation.
//!
//! Provides the configuration structure for data locations, download
//! endpoints, load concurrency and export settings, with JSON file loading
//! and builder-style overrides applied by the CLI.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_EXPORT_FILE_NAME, DEFAULT_GPX_CREATOR, DEFAULT_ROUTE_LINK_BASE,
    DEFAULT_SOURCE_BASE_URL,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for the route browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one `<Country>.json` file per country
    pub data_dir: PathBuf,

    /// Download endpoint; the numeric country code is appended
    pub source_base_url: String,

    /// Base URL that relative route links are resolved against
    pub route_link_base: String,

    /// Maximum number of country loads in flight at once
    pub max_concurrent_loads: usize,

    /// File name used for GPX exports when no output path is given
    pub export_file_name: String,

    /// GPX `creator` attribute
    pub gpx_creator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            source_base_url: DEFAULT_SOURCE_BASE_URL.to_string(),
            route_link_base: DEFAULT_ROUTE_LINK_BASE.to_string(),
            max_concurrent_loads: num_cpus::get() * 2,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            gpx_creator: DEFAULT_GPX_CREATOR.to_string(),
        }
    }
}

impl Config {
    /// Default data directory under the user data directory, or `./data`
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join("data"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file '{}'", path.display()), e)
        })?;
        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            Error::json(format!("Failed to parse config file '{}'", path.display()), e)
        })?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the download endpoint
    pub fn with_source_base_url(mut self, url: impl Into<String>) -> Self {
        self.source_base_url = url.into();
        self
    }

    /// Set the maximum number of concurrent country loads
    pub fn with_max_concurrent_loads(mut self, loads: usize) -> Self {
        self.max_concurrent_loads = loads;
        self
    }

    /// Set the export file name
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_loads == 0 {
            return Err(Error::configuration(
                "max_concurrent_loads must be greater than 0",
            ));
        }

        if self.source_base_url.trim().is_empty() {
            return Err(Error::configuration("source_base_url cannot be empty"));
        }

        if self.route_link_base.trim().is_empty() {
            return Err(Error::configuration("route_link_base cannot be empty"));
        }

        if self.export_file_name.trim().is_empty() {
            return Err(Error::configuration("export_file_name cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.max_concurrent_loads > 0);
        assert_eq!(config.export_file_name, "filtered_routes.gpx");
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::default()
            .with_data_dir("/tmp/routes")
            .with_max_concurrent_loads(3)
            .with_export_file_name("out.gpx");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/routes"));
        assert_eq!(config.max_concurrent_loads, 3);
        assert_eq!(config.export_file_name, "out.gpx");
    }

    #[test]
    fn test_validation_rejects_zero_concurrency() {
        let config = Config::default().with_max_concurrent_loads(0);
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_dir": "/srv/routes", "max_concurrent_loads": 2 }"#)
            .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/routes"));
        assert_eq!(config.max_concurrent_loads, 2);
        assert_eq!(config.gpx_creator, DEFAULT_GPX_CREATOR);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::Json { .. })));
    }
}
