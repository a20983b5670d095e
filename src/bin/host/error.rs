//! Host tool errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid timestamp format {0:?}")]
    TimestampFormat(String),

    #[error("baud rate must be greater than zero")]
    BaudRate,

    #[error("failed to open serial port {port}: {source}")]
    SerialOpen {
        port: String,
        #[source]
        source: io::Error,
    },

    #[error("serial I/O error: {0}")]
    Serial(#[source] io::Error),

    #[error("output file {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
