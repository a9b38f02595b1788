/*!
Configuration management for the gaccode command line tool.
*/

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub encode: EncodeConfig,
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            encode: EncodeConfig::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// Load the file if it exists, defaults otherwise.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            warn!("No config file at {}, using defaults", path.as_ref().display());
            return Ok(Self::new());
        }
        Self::load_from_file(path)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How `encode` prints a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line of hex bytes per frame
    Frames,
    /// Mark/space durations in microseconds
    Lirc,
    /// Broadlink packet as hex
    Broadlink,
    /// Broadlink packet as base64
    Base64,
}

/// Defaults used when `encode` flags are omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Brand name
    pub brand: String,

    /// Model name; unknown models use the brand's generic remote
    pub model: String,

    /// Target temperature in °C
    pub temperature: i32,

    /// Operating mode
    pub mode: String,

    /// Fan speed
    pub fan: String,

    /// Output format
    pub format: OutputFormat,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            brand: "daikin".to_string(),
            model: "generic".to_string(),
            temperature: 25,
            mode: "cool".to_string(),
            fan: "auto".to_string(),
            format: OutputFormat::Lirc,
        }
    }
}
