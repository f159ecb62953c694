//! Daemon configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Result, SniffError};

/// Main configuration for the sniffer daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SniffConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Radio / capture settings
    pub radio: RadioConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Radio / capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioConfig {
    /// Network interface to capture on
    pub interface: String,
    /// Channel the radio is tuned to; stamped into each record when the
    /// capture source does not report one itself
    pub channel: u8,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the column banner at startup
    pub banner: bool,
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                log_level: "info".to_string(),
            },
            radio: RadioConfig {
                interface: "wlan0".to_string(),
                channel: 6,
            },
            output: OutputConfig { banner: true },
        }
    }
}

impl SniffConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| SniffError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SniffError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
