//! Configuration management for obralog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "obralog";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "registros.db";

/// Default directory name for captured photos, under the data directory.
const PHOTO_DIR_NAME: &str = "fotos";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `OBRALOG_`)
/// 2. TOML config file at `~/.config/obralog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Device capture configuration.
    pub device: DeviceConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/obralog/registros.db`
    pub database_path: Option<PathBuf>,
}

/// Device capture configuration.
///
/// The enable flags are the consent gate for the two device capabilities:
/// a disabled capability behaves exactly like a refused permission prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Allow geolocation capture.
    pub location_enabled: bool,
    /// Allow photo capture.
    pub camera_enabled: bool,
    /// Photo capture quality, in (0, 1].
    pub photo_quality: f64,
    /// Directory where captured photos are kept.
    /// Defaults to `~/.local/share/obralog/fotos`
    pub photo_dir: Option<PathBuf>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            location_enabled: true,
            camera_enabled: true,
            photo_quality: 0.7,
            photo_dir: None, // Will be resolved to default at runtime
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `OBRALOG_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("OBRALOG_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.device.photo_quality <= 0.0 || self.device.photo_quality > 1.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "photo_quality must be within (0, 1], got {}",
                    self.device.photo_quality
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the photo directory, resolving defaults if not set.
    #[must_use]
    pub fn photo_dir(&self) -> PathBuf {
        self.device
            .photo_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(PHOTO_DIR_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert!(config.device.location_enabled);
        assert!(config.device.camera_enabled);
        assert!((config.device.photo_quality - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_photo_quality_out_of_range() {
        let mut config = Config::default();
        config.device.photo_quality = 1.5;
        assert!(config.validate().is_err());

        config.device.photo_quality = 0.0;
        assert!(config.validate().is_err());

        config.device.photo_quality = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("registros.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_photo_dir_default() {
        let config = Config::default();
        assert!(config.photo_dir().to_string_lossy().contains("fotos"));
    }

    #[test]
    fn test_photo_dir_custom() {
        let mut config = Config::default();
        config.device.photo_dir = Some(PathBuf::from("/custom/fotos"));
        assert_eq!(config.photo_dir(), PathBuf::from("/custom/fotos"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("obralog"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        let path = Config::default_data_dir();
        assert!(path.to_string_lossy().contains("obralog"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_device_config_deserialize() {
        let json = r#"{"location_enabled": false, "photo_quality": 0.5}"#;
        let device: DeviceConfig = serde_json::from_str(json).unwrap();
        assert!(!device.location_enabled);
        assert!(device.camera_enabled);
        assert!((device.photo_quality - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_storage_config_serialize() {
        let storage = StorageConfig::default();
        let json = serde_json::to_string(&storage).unwrap();
        assert!(json.contains("database_path"));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
