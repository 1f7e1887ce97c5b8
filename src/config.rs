//! Configuration management for the weather feed adapter
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherFeedError;
use crate::dates::DatePatterns;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weather feed adapter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherFeedConfig {
    /// Feed transport configuration
    #[serde(default)]
    pub feed: FeedConfig,
    /// Feed content parsing configuration
    #[serde(default)]
    pub parsing: ParsingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feed transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed URL up to and including the `location=` query parameter
    #[serde(default = "default_feed_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_feed_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_feed_max_retries")]
    pub max_retries: u32,
    /// Request metric units from the feed
    #[serde(default)]
    pub metric: bool,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Feed content parsing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// chrono format strings tried in order for sunset and observation times
    #[serde(default = "default_date_patterns")]
    pub date_patterns: Vec<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_feed_base_url() -> String {
    "http://uport.accu-weather.com/widget/uport/weather-data.asp?location=".to_string()
}

fn default_feed_timeout() -> u32 {
    30
}

fn default_feed_max_retries() -> u32 {
    2
}

fn default_user_agent() -> String {
    format!("weatherfeed/{}", crate::VERSION)
}

fn default_date_patterns() -> Vec<String> {
    DatePatterns::default().patterns().to_vec()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_feed_base_url(),
            timeout_seconds: default_feed_timeout(),
            max_retries: default_feed_max_retries(),
            metric: false,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            date_patterns: default_date_patterns(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherFeedConfig {
    /// Load configuration from the given path (or the default location) and environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERFEED_FEED__BASE_URL, WEATHERFEED_LOGGING__LEVEL, ...
        builder = builder.add_source(
            Environment::with_prefix("WEATHERFEED")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherFeedConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherfeed").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.feed.base_url.is_empty() {
            self.feed.base_url = default_feed_base_url();
        }
        if self.feed.timeout_seconds == 0 {
            self.feed.timeout_seconds = default_feed_timeout();
        }
        if self.feed.user_agent.is_empty() {
            self.feed.user_agent = default_user_agent();
        }
        if self.parsing.date_patterns.is_empty() {
            self.parsing.date_patterns = default_date_patterns();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.date_patterns().validate()?;
        Ok(())
    }

    /// Date patterns used when resolving feed timestamps
    #[must_use]
    pub fn date_patterns(&self) -> DatePatterns {
        DatePatterns::new(self.parsing.date_patterns.clone())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.feed.timeout_seconds > 300 {
            return Err(
                WeatherFeedError::config("Feed timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.feed.max_retries > 10 {
            return Err(WeatherFeedError::config("Feed max retries cannot exceed 10").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherFeedError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherFeedError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.feed.base_url.starts_with("http://") && !self.feed.base_url.starts_with("https://")
        {
            return Err(WeatherFeedError::config(
                "Feed base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = WeatherFeedConfig::default();
        assert!(config.feed.base_url.ends_with("location="));
        assert_eq!(config.feed.timeout_seconds, 30);
        assert!(!config.feed.metric);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.parsing.date_patterns.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherFeedConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WeatherFeedConfig::default();
        config.feed.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = WeatherFeedConfig::default();
        config.feed.base_url = "ftp://example.com/feed?location=".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_broken_date_pattern() {
        let mut config = WeatherFeedConfig::default();
        config.parsing.date_patterns = vec!["%Q".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = WeatherFeedConfig::default();
        config.feed.base_url.clear();
        config.parsing.date_patterns.clear();
        config.apply_defaults();
        assert_eq!(config.feed.base_url, default_feed_base_url());
        assert_eq!(config.parsing.date_patterns, default_date_patterns());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[feed]
base_url = "https://feed.example.com/weather.asp?location="
metric = true

[parsing]
date_patterns = ["%H:%M"]
"#
        )
        .unwrap();

        let config = WeatherFeedConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(
            config.feed.base_url,
            "https://feed.example.com/weather.asp?location="
        );
        assert!(config.feed.metric);
        assert_eq!(config.parsing.date_patterns, vec!["%H:%M".to_string()]);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WeatherFeedConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherfeed"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
