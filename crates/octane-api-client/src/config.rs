//! Client configuration
//!
//! Settings come from, in increasing priority: built-in defaults, an optional
//! configuration file (any format the `config` crate understands), and
//! `OCTANE_*` environment variables (`OCTANE_TOKEN`, `OCTANE_ORIGIN`,
//! `OCTANE_BASE_URL`, ...).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use octane_http::HttpConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LIBRARY_NAME: &str = "Octane API Client";
pub const LIBRARY_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TOKEN: &str = "mock";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_BASE_URL: &str = "/api/v1";
pub const DEFAULT_HEALTH_CHECK_SECS: u64 = 1800;

/// Configuration result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Everything needed to reach one Octane server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Sent as `X-Octane-API-Token`
    #[serde(default = "default_token")]
    pub token: String,

    /// Scheme, host and port, e.g. `http://localhost:3000`
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path prefix of every endpoint, e.g. `/api/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long a healthy or degraded health check is reused
    #[serde(default = "default_health_check_secs")]
    pub health_check_secs: u64,

    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            origin: default_origin(),
            base_url: default_base_url(),
            health_check_secs: default_health_check_secs(),
            http: HttpConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(
        token: impl Into<String>,
        origin: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            origin: origin.into(),
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Reuse health results for `interval`, rounded up to whole seconds.
    /// A zero interval checks health before every call.
    pub fn with_health_check_interval(mut self, interval: Duration) -> Self {
        self.health_check_secs = interval.as_secs() + u64::from(interval.subsec_nanos() > 0);
        self
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(ConfigError::Validation("Token must not be empty".to_string()));
        }
        if !(self.origin.starts_with("http://") || self.origin.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "Origin must be an http(s) URL: {}",
                self.origin
            )));
        }
        if self.origin.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "Origin must not end with '/': {}",
                self.origin
            )));
        }
        if !self.base_url.is_empty() && !self.base_url.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "Base URL must start with '/': {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

/// Loads [`ClientConfig`] from a file and the environment
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "OCTANE".to_string(),
        }
    }

    /// Also read `path`; a missing file is not an error
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<ClientConfig> {
        let mut builder = Config::builder();
        if let Some(path) = &self.config_path {
            builder = builder.add_source(File::from(path.clone()).required(false));
        }
        builder = builder.add_source(Environment::with_prefix(&self.env_prefix).prefix_separator("_"));

        let config: ClientConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_health_check_secs() -> u64 {
    DEFAULT_HEALTH_CHECK_SECS
}
