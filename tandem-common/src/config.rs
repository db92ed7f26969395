//! Configuration loading for the Tandem player
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments
//! 2. Environment variables (`PORT`, `TANDEM_DURATION`, `TANDEM_CONFIG`)
//! 3. TOML configuration file (only when one is named explicitly)
//! 4. Built-in defaults (code constants)
//!
//! CLI and environment are merged by the binary (clap reads both); this
//! module owns the TOML layer, the defaults, and validation.

use crate::audio_state::DEFAULT_DURATION_SECS;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Player configuration
///
/// Every field has a built-in default, so an empty TOML file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// HTTP listening port
    pub port: u16,

    /// Track length in seconds
    pub duration_secs: u32,

    /// Period of the virtual playback clock
    pub tick_interval_ms: u64,

    /// Emit a snapshot on every tick, even when nothing changed
    pub heartbeat: bool,

    /// Outbound snapshots buffered per subscriber before it is evicted
    pub subscriber_queue: usize,

    /// Upper bound on a single WebSocket frame write
    pub write_timeout_ms: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            duration_secs: DEFAULT_DURATION_SECS,
            tick_interval_ms: 1000,
            heartbeat: true,
            subscriber_queue: 64,
            write_timeout_ms: 5000,
            logging: LoggingConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlayerConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a TOML file. A file that was named but cannot be read is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line / environment overrides on top of the file values
    pub fn with_overrides(mut self, port: Option<u16>, duration_secs: Option<u32>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(duration_secs) = duration_secs {
            self.duration_secs = duration_secs;
        }
        self
    }

    /// Reject values the player cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.duration_secs == 0 {
            return Err(Error::Config("duration_secs must be greater than 0".to_string()));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be greater than 0".to_string()));
        }
        if self.subscriber_queue == 0 {
            return Err(Error::Config("subscriber_queue must be greater than 0".to_string()));
        }
        if self.write_timeout_ms == 0 {
            return Err(Error::Config("write_timeout_ms must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}
