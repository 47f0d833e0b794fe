//! Configuration loading utilities

use crate::schema::Config;
use ndvi_common::{NdviError, Result as NdviResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "NDVI_CHART_CONFIG";

/// Files probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The file extension does not name a supported format
    #[error("Unsupported configuration format for '{0}', expected .yaml, .yml or .toml")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the offending variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Invalid(#[source] NdviError),
}

impl From<ConfigError> for NdviError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(inner) => inner,
            other => {
                let message = other.to_string();
                Self::config_with_source(message, other)
            }
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::Invalid)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from environment variables and files
    pub fn load() -> NdviResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.exists())
        {
            return Ok(Self::load_config(found)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text without overrides or validation
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse configuration from TOML text without overrides or validation
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides resolved through `lookup`
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(period) = lookup("NDVI_CHART_PERIOD_MILLIS") {
            config.schedule.period_millis =
                period.trim().parse().map_err(|e| ConfigError::EnvParseError {
                    var: "NDVI_CHART_PERIOD_MILLIS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(path) = lookup("NDVI_CHART_NDVI_PATH") {
            config.data.ndvi_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("NDVI_CHART_PRECIPITATION_PATH") {
            config.data.precipitation_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("NDVI_CHART_OUTPUT_PATH") {
            config.chart.output_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(level) = lookup("NDVI_CHART_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
