//! Host tool configuration.
//!
//! Values come from an optional TOML file; command line flags override them.
//!
//! ```toml
//! port = "/dev/ttyACM0"
//! baud_rate = 115200
//! read_timeout_ms = 2000
//! output = "output.txt"
//! timestamp_format = "%d-%m-%y %H:%M:%S"
//! ```

use crate::error::HostError;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(windows)]
const DEFAULT_PORT: &str = "COM3";
#[cfg(not(windows))]
const DEFAULT_PORT: &str = "/dev/ttyACM0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Serial device path
    pub port: String,

    pub baud_rate: u32,

    /// Idle time after which a heartbeat is logged
    pub read_timeout_ms: u64,

    /// File receiving timestamped lines (truncated at start)
    pub output: PathBuf,

    /// strftime format appended to every line
    pub timestamp_format: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: 115_200,
            read_timeout_ms: 2000,
            output: PathBuf::from("output.txt"),
            timestamp_format: "%d-%m-%y %H:%M:%S".to_string(),
        }
    }
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<String>,
    pub baud_rate: Option<u32>,
    pub output: Option<PathBuf>,
}

impl HostConfig {
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let text = std::fs::read_to_string(path).map_err(|source| HostError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, HostError> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(baud_rate) = overrides.baud_rate {
            self.baud_rate = baud_rate;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        self
    }

    pub fn validate(&self) -> Result<(), HostError> {
        if self.baud_rate == 0 {
            return Err(HostError::BaudRate);
        }
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(HostError::TimestampFormat(self.timestamp_format.clone()));
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.max(1))
    }
}
