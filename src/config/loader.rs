use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/viewkit/config.toml` on Unix/macOS, or the equivalent
    /// from `dirs::config_dir()` elsewhere. Falls back to the current
    /// directory if there is no config dir.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("viewkit").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Both carousel delays are non-zero
    /// - The settle window is shorter than the auto-advance delay
    /// - Base URL and events URL are set
    /// - The request timeout is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let carousel = &self.carousel;
        if carousel.advance_delay_ms == 0 || carousel.settle_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "Carousel delays must be greater than zero".to_string(),
            });
        }

        if carousel.settle_ms >= carousel.advance_delay_ms {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Carousel settle_ms ({}) must be shorter than advance_delay_ms ({})",
                    carousel.settle_ms, carousel.advance_delay_ms
                ),
            });
        }

        if self.http.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "http.base_url must not be empty".to_string(),
            });
        }

        if self.calendar.events_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "calendar.events_url must not be empty".to_string(),
            });
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "http.timeout_seconds must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
