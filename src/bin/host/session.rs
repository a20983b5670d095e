//! One logging session against a monitor on a serial port.
//!
//! Two activities run until the user quits or the port fails:
//! - the reader turns received bytes into lines and appends them, with a
//!   local timestamp, to the output file
//! - the keyboard loop (raw terminal mode, blocking thread) forwards command
//!   keys to the monitor
//!
//! A read error ends the session even while no key is pressed.

use crate::config::HostConfig;
use crate::error::HostError;
use crate::keys::{KeyAction, map_key};
use crate::line::LineAssembler;
use chrono::Local;
use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serial2_tokio::SerialPort;
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// RAII guard that enables raw terminal mode on creation and restores on drop.
///
/// Raw mode delivers single key presses without waiting for Enter.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Byte transport to the board.
trait Link {
    /// Read whatever is available into `buf`.
    async fn read_chunk(&self, buf: &mut [u8]) -> io::Result<usize>;

    async fn write_byte(&self, byte: u8) -> io::Result<()>;
}

impl Link for SerialPort {
    async fn read_chunk(&self, buf: &mut [u8]) -> io::Result<usize> {
        SerialPort::read(self, buf).await
    }

    async fn write_byte(&self, byte: u8) -> io::Result<()> {
        match SerialPort::write(self, &[byte]).await? {
            0 => Err(io::ErrorKind::WriteZero.into()),
            _ => Ok(()),
        }
    }
}

pub async fn run(config: HostConfig) -> Result<(), HostError> {
    let port = SerialPort::open(&config.port, config.baud_rate).map_err(|source| {
        HostError::SerialOpen {
            port: config.port.clone(),
            source,
        }
    })?;

    let mut output = File::create(&config.output)
        .await
        .map_err(|source| output_error(&config.output, source))?;

    info!(
        port = %config.port,
        baud = config.baud_rate,
        output = %config.output.display(),
        "session started, keys: s = pause/resume, 1/2 = interval, e = exit"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (key_tx, key_rx) = mpsc::unbounded_channel();

    let _raw_mode = RawModeGuard::new().map_err(HostError::Terminal)?;

    let keyboard = tokio::task::spawn_blocking(move || keyboard_loop(key_tx, shutdown_rx));

    let driven = drive(&port, &mut output, key_rx, &config).await;
    let _ = shutdown_tx.send(true);
    let keys = keyboard.await?;

    driven?;
    keys.map_err(HostError::Terminal)?;

    info!("session ended");
    Ok(())
}

/// Log lines and forward keys until the user quits or either side fails.
async fn drive<L, W>(
    link: &L,
    output: &mut W,
    keys: mpsc::UnboundedReceiver<KeyAction>,
    config: &HostConfig,
) -> Result<(), HostError>
where
    L: Link,
    W: AsyncWrite + Unpin,
{
    let result = tokio::select! {
        read = read_lines(link, &mut *output, config) => read,
        forwarded = forward_keys(link, keys) => forwarded,
    };

    let flushed = output
        .flush()
        .await
        .map_err(|source| output_error(&config.output, source));

    result?;
    flushed
}

fn output_error(path: &Path, source: io::Error) -> HostError {
    HostError::Output {
        path: path.to_path_buf(),
        source,
    }
}

/// Send forwarded keys until the user quits or the keyboard loop stops.
async fn forward_keys<L: Link>(
    link: &L,
    mut keys: mpsc::UnboundedReceiver<KeyAction>,
) -> Result<(), HostError> {
    while let Some(action) = keys.recv().await {
        match action {
            KeyAction::Forward(byte) | KeyAction::ForwardAndQuit(byte) => {
                link.write_byte(byte).await.map_err(HostError::Serial)?;
                debug!(key = %(byte as char), "forwarded");
            }
            KeyAction::Quit | KeyAction::Ignore => {}
        }
        if action.ends_session() {
            break;
        }
    }
    Ok(())
}

fn keyboard_loop(
    keys: mpsc::UnboundedSender<KeyAction>,
    shutdown: watch::Receiver<bool>,
) -> io::Result<()> {
    loop {
        if *shutdown.borrow() {
            return Ok(());
        }
        if !event::poll(KEY_POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        let action = map_key(&key);
        if action == KeyAction::Ignore {
            continue;
        }
        if keys.send(action).is_err() || action.ends_session() {
            return Ok(());
        }
    }
}

/// Append timestamped lines to `output`. Returns only on a read or write error.
async fn read_lines<L, W>(link: &L, output: &mut W, config: &HostConfig) -> Result<(), HostError>
where
    L: Link,
    W: AsyncWrite + Unpin,
{
    let timeout = config.read_timeout();
    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; 256];

    loop {
        let n = match tokio::time::timeout(timeout, link.read_chunk(&mut buf)).await {
            Err(_) => {
                debug!("no data for {:?}", timeout);
                continue;
            }
            Ok(Ok(n)) => n,
            Ok(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
            Ok(Err(e)) => {
                warn!("serial read failed: {}", e);
                return Err(HostError::Serial(e));
            }
        };

        for line in assembler.feed(&buf[..n]) {
            let record = format_record(&line, &config.timestamp_format);
            output
                .write_all(record.as_bytes())
                .await
                .map_err(|source| output_error(&config.output, source))?;
            info!(target: "monitor", "{}", line);
        }
    }
}

/// `<line> <timestamp>\n`
///
/// The format string is validated when the configuration is loaded.
fn format_record(line: &str, timestamp_format: &str) -> String {
    format!("{} {}\n", line, Local::now().format(timestamp_format))
}
