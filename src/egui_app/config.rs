use std::env;
use std::path::{Path, PathBuf};

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};

/// Names a TOML file to read settings from
pub const CONFIG_FILE_ENV: &str = "AUTHPORTAL_CONFIG";
/// Overrides the backend base URL
pub const API_URL_ENV: &str = "AUTHPORTAL_API_URL";
/// Overrides where the session key/value file lives
pub const STORAGE_PATH_ENV: &str = "AUTHPORTAL_STORAGE";
/// Standard tracing filter variable
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Resolved client configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, then the file named by `AUTHPORTAL_CONFIG`, then environment
    /// variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();
        if let Ok(url) = env::var(API_URL_ENV) {
            builder = builder.server_url(url);
        }
        if let Ok(path) = env::var(STORAGE_PATH_ENV) {
            builder = builder.storage_path(path);
        }
        if let Ok(filter) = env::var(LOG_FILTER_ENV) {
            builder = builder.log_filter(filter);
        }
        if let Ok(path) = env::var(CONFIG_FILE_ENV) {
            builder = builder.file(FileConfig::read(Path::new(&path))?);
        }
        Self::with_builder(builder)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn storage_path(&self) -> PathBuf {
        self.app
            .storage_path
            .clone()
            .unwrap_or_else(default_storage_path)
    }

    pub fn log_filter(&self) -> &str {
        &self.app.log_filter
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("authportal")
        .join("storage.json")
}
