//! Transport settings
//!
//! Durations are written as whole seconds so the settings can sit in a
//! configuration file next to the client's own options:
//!
//! ```toml
//! [http]
//! timeout = 10
//! proxy = "http://proxy.internal:8080"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout
    #[serde(default = "default_timeout", with = "secs")]
    pub timeout: Duration,

    #[serde(default = "default_connect_timeout", with = "secs")]
    pub connect_timeout: Duration,

    /// Proxy for every scheme
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Redirects followed before giving up (0 = none)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Keep idle connections for reuse
    #[serde(default = "default_pool_enabled")]
    pub pool_enabled: bool,

    #[serde(default = "default_pool_idle_timeout", with = "secs")]
    pub pool_idle_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            proxy: None,
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            pool_enabled: default_pool_enabled(),
            pool_idle_timeout: default_pool_idle_timeout(),
        }
    }
}

impl HttpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short timeouts for a server on the same machine or network
    pub fn local() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Default::default()
        }
    }

    /// Long request timeout for uploading or downloading large content
    pub fn transfer() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Open a fresh connection for every request
    pub fn without_pooling(mut self) -> Self {
        self.pool_enabled = false;
        self
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    format!("octane-api-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_redirects() -> usize {
    10
}

fn default_pool_enabled() -> bool {
    true
}

fn default_pool_idle_timeout() -> Duration {
    Duration::from_secs(90)
}
