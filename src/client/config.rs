use std::path::PathBuf;
use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Environment variable overriding the API origin
pub const API_URL_ENV: &str = "STUDYREEL_API_URL";
/// Environment variable overriding the durable state directory
pub const HOME_ENV: &str = "STUDYREEL_HOME";
/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "STUDYREEL_TIMEOUT_SECS";

const SESSION_FILE: &str = "session.json";

/// Client configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
        })
    }

    /// Read overrides from the environment on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            builder = builder.server_url(url);
        }
        if let Ok(dir) = std::env::var(HOME_ENV) {
            builder = builder.data_dir(dir);
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                name: TIMEOUT_ENV,
                message: format!("'{}': {}", raw, e),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Self::with_builder(builder)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.server_url(), path.trim_start_matches('/'))
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn timeout(&self) -> Duration {
        self.app.timeout
    }

    /// Directory holding durable client state
    pub fn data_dir(&self) -> PathBuf {
        match &self.app.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join("studyreel"))
                .unwrap_or_else(|| PathBuf::from(".studyreel")),
        }
    }

    /// File backing the persisted session
    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join(SESSION_FILE)
    }
}
