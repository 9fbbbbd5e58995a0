/*!
 * Configuration types for esi-remote
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use esi_connect::{ConnectConfig, DEFAULT_HOST, DEFAULT_PORT};

use crate::error::{EsiError, Result};

/// Client configuration, usually loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Host of the FwESI remote-control server, including scheme
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the FwESI remote-control server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Push every change to the server as soon as it is made.
    /// When false, changes wait for an explicit `commit()`.
    #[serde(default = "default_true")]
    pub autocommit: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Interval between pushed values when ramping a property, in milliseconds
    #[serde(default = "default_ramp_tick_ms")]
    pub ramp_tick_ms: u64,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stderr)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            autocommit: true,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            ramp_tick_ms: default_ramp_tick_ms(),
            log_level: LogLevel::default(),
            log_file: None,
            verbose: false,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    #[default]
    Warn,

    /// Info, warnings, and errors
    Info,

    /// Debug and above
    Debug,

    /// All messages including request/response bodies
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("esi-remote/{}", env!("CARGO_PKG_VERSION"))
}

fn default_ramp_tick_ms() -> u64 {
    50
}

impl RemoteConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EsiError::Config(format!("{}: {}", path.display(), e)))?;
        let config: RemoteConfig = toml::from_str(&contents)
            .map_err(|e| EsiError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| EsiError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values that cannot work at all
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(EsiError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(EsiError::Config("port must not be 0".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(EsiError::Config("timeout_secs must be at least 1".to_string()));
        }
        if self.ramp_tick_ms == 0 {
            return Err(EsiError::Config("ramp_tick_ms must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Connection settings for the HTTP transport
    pub fn connect_config(&self) -> ConnectConfig {
        ConnectConfig {
            host: self.host.clone(),
            port: self.port,
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Tick used to pace ramps
    pub fn ramp_tick(&self) -> Duration {
        Duration::from_millis(self.ramp_tick_ms)
    }
}
