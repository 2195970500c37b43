//! Configuration loading for the Trustwatch dashboard.
//! Reads trustwatch.toml from the current directory or the path in TRUSTWATCH_CONFIG.
//! The backend origin is fixed in `trustwatch_api::API_BASE_URL` and is not configurable.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use trustwatch_common::error::{Result, TrustwatchError};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16 { 3001 }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| {
                TrustwatchError::Config(format!("invalid server.host {:?}: {}", self.host, e))
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; RUST_LOG wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "info,tower_http=info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}


impl Config {
    /// Load configuration from trustwatch.toml.
    /// Checks TRUSTWATCH_CONFIG env var first, then current directory.
    /// A missing file means defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var("TRUSTWATCH_CONFIG")
            .unwrap_or_else(|_| "trustwatch.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml_str(&content)?
        } else {
            info!(%path, "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply TRUSTWATCH_HOST / TRUSTWATCH_PORT on top of file values.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("TRUSTWATCH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TRUSTWATCH_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| {
                    TrustwatchError::Config(format!("invalid TRUSTWATCH_PORT {:?}: {}", port, e))
                })?;
        }
        Ok(())
    }
}
