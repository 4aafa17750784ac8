//! Configuration management for front-end nodes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default upper bound on a blocking servant call
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 2000;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`Config`]
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub device: DeviceConfig,
    pub servant: ServantConfig,
    pub logging: LoggingConfig,
}

/// Reference device settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device name, used in log fields and port names
    pub name: String,
    /// Flow id reported before any set
    pub rf_flow_id: String,
    /// Whether flow id get/set is implemented
    pub supports_flow_id: bool,
    /// Whether RF info packet get/set is implemented
    pub supports_info_pkt: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServantConfig {
    /// Upper bound on a blocking call; 0 waits indefinitely
    pub call_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "rx-0".to_string(),
            rf_flow_id: "flow-0".to_string(),
            supports_flow_id: true,
            supports_info_pkt: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Default for ServantConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

impl ServantConfig {
    pub fn call_timeout(&self) -> Option<Duration> {
        match self.call_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            device: DeviceConfig::default(),
            servant: ServantConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
