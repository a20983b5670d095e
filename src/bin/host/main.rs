//! Host companion for the temperature monitor.
//!
//! Logs every line the board prints to a file with a local timestamp, and
//! forwards single key presses (`s`, `1`, `2`, `e`) to the board.
//!
//! ```bash
//! cargo run --bin ntc-monitor-host --features host -- --port /dev/ttyACM0
//! ```

mod config;
mod error;
mod keys;
mod line;
mod session;

use clap::Parser;
use config::{HostConfig, Overrides};
use error::HostError;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ntc-monitor-host", version, about = "Log temperature readings from a serial port")]
struct Args {
    /// Serial device (COM3, /dev/ttyACM0, ...)
    #[arg(short, long)]
    port: Option<String>,

    #[arg(short, long)]
    baud: Option<u32>,

    /// File receiving timestamped lines
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Stderr writer that emits `\r\n` line endings.
///
/// Raw terminal mode disables output post-processing, so a bare `\n` would
/// not return the cursor to column zero.
struct CrlfWriter(io::Stderr);

impl Write for CrlfWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut start = 0;
        for (i, &byte) in buf.iter().enumerate() {
            if byte == b'\n' {
                self.0.write_all(&buf[start..i])?;
                self.0.write_all(b"\r\n")?;
                start = i + 1;
            }
        }
        self.0.write_all(&buf[start..])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| CrlfWriter(io::stderr()))
        .init();
}

fn load_config(args: &Args) -> Result<HostConfig, HostError> {
    let config = match &args.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    let config = config.with_overrides(Overrides {
        port: args.port.clone(),
        baud_rate: args.baud,
        output: args.output.clone(),
    });
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match load_config(&args) {
        Ok(config) => session::run(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
