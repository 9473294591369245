//! Application configuration module
//!
//! Provides configuration types for the application.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Default backend URL
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, without a trailing slash
    pub server_url: String,
    /// Where the key/value store lives; `None` means the platform data dir
    pub storage_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            storage_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.server_url)
            .map_err(|_| ConfigError::InvalidUrl(self.server_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        Ok(())
    }
}

/// Shape of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub storage_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    storage_path: Option<PathBuf>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Layer values from a config file under anything already set.
    pub fn file(mut self, file: FileConfig) -> Self {
        self.server_url = self.server_url.or(file.server_url);
        self.storage_path = self.storage_path.or(file.storage_path);
        self.log_filter = self.log_filter.or(file.log_filter);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let server_url = self
            .server_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let config = AppConfig {
            server_url,
            storage_path: self.storage_path,
            log_filter: self
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = AppConfig::builder().build().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server_url, "http://localhost:8080");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = AppConfig::builder()
            .server_url("https://portal.example.com/")
            .build()
            .unwrap();
        assert_eq!(config.server_url, "https://portal.example.com");
    }

    #[test]
    fn test_builder_rejects_bad_urls() {
        for url in ["not a url", "ftp://files.example.com"] {
            let result = AppConfig::builder().server_url(url).build();
            assert!(matches!(result, Err(ConfigError::InvalidUrl(_))), "{url}");
        }
    }

    #[test]
    fn test_explicit_values_win_over_file() {
        let file = FileConfig::parse(
            r#"
                server_url = "http://file.example.com"
                log_filter = "debug"
            "#,
        )
        .unwrap();

        let config = AppConfig::builder()
            .server_url("http://explicit.example.com")
            .file(file)
            .build()
            .unwrap();

        assert_eq!(config.server_url, "http://explicit.example.com");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_file_parse_error() {
        let result = FileConfig::parse("server_url = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
