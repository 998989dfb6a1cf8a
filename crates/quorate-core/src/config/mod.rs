//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: set on the builder and mirrored by the `Default` impls
//! 2. **Config file**: TOML file named by the `QUORATE_CONFIG` env var
//! 3. **Environment variables**: `QUORATE__*` env vars override specific fields
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! bind_port = 8545
//!
//! [backends]
//! urls = ["https://node-a.example.com", "https://node-b.example.com", "http://10.0.0.7:8545"]
//! timeout_seconds = 10
//! blocks_behind_tolerance = 3
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Requests processed at once before new ones queue. Defaults to `1000`.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Maximum accepted request body. Defaults to 1 MiB.
    #[serde(default = "default_max_request_body_bytes")]
    pub max_request_body_bytes: usize,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_port() -> u16 {
    8545
}

fn default_max_concurrent_requests() -> usize {
    1000
}

fn default_max_request_body_bytes() -> usize {
    1024 * 1024
}

/// Backend node settings. Every URL is called for every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendsConfig {
    #[serde(default)]
    pub urls: Vec<String>,

    /// Per-backend HTTP timeout. Defaults to `10`.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// How many blocks a backend may lag and still count for `eth_blockNumber`.
    /// Defaults to `3`.
    #[serde(default = "default_blocks_behind_tolerance")]
    pub blocks_behind_tolerance: u64,

    /// Upper bound on a single fan-out. Unset means the dispatcher waits for every backend.
    #[serde(default)]
    pub call_deadline_seconds: Option<u64>,
}

impl BackendsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    #[must_use]
    pub fn call_deadline(&self) -> Option<Duration> {
        self.call_deadline_seconds.map(Duration::from_secs)
    }
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_blocks_behind_tolerance() -> u64 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"pretty"` or `"json"`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backends: BackendsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_concurrent_requests: default_max_concurrent_requests(),
            max_request_body_bytes: default_max_request_body_bytes(),
        }
    }
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            timeout_seconds: default_timeout_seconds(),
            blocks_behind_tolerance: default_blocks_behind_tolerance(),
            call_deadline_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// Use `__` as a separator for nested fields, e.g. `QUORATE__SERVER__BIND_PORT=9000`.
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be parsed or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_builder = Config::builder()
            .set_default("server.bind_address", default_bind_address())?
            .set_default("server.bind_port", i64::from(default_bind_port()))?
            .set_default("backends.timeout_seconds", default_timeout_seconds())?
            .set_default("backends.blocks_behind_tolerance", default_blocks_behind_tolerance())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("metrics.enabled", true)?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("QUORATE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("backends.urls")
                    .try_parsing(true),
            )
            .build()?;

        config_builder.try_deserialize()
    }

    /// Loads configuration from `config/config.toml`, or the file named by `QUORATE_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("QUORATE_CONFIG")
            .unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// # Errors
    ///
    /// Returns an error string if the bind address and port do not form a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
            .parse()
            .map_err(|_| {
                format!(
                    "Invalid socket address: {}:{}",
                    self.server.bind_address, self.server.bind_port
                )
            })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string for the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.backends.urls.is_empty() {
            return Err("No backend RPC endpoints configured".to_string());
        }

        for url in &self.backends.urls {
            match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => return Err(format!("Invalid backend URL: {url}")),
            }
        }

        if self.backends.timeout_seconds == 0 {
            return Err("Backend timeout must be greater than 0".to_string());
        }

        if self.backends.call_deadline_seconds == Some(0) {
            return Err("Call deadline must be greater than 0 when set".to_string());
        }

        if self.server.max_concurrent_requests == 0 {
            return Err("Max concurrent requests must be greater than 0".to_string());
        }

        if self.server.bind_port == 0 {
            return Err("Bind port must be greater than 0".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }
}
