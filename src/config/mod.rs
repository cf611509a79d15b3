#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::ConfigError;
use crate::utils::validation::{validate_positive, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Polling configuration. One recognized option; immutable while enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between polling cycles.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl WatchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Validate for WatchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("refresh_interval", self.refresh_interval)
    }
}
