//! Test fixtures for ntc-monitor testing.
//!
//! Provides:
//! - `MockAnalog`: Test implementation of AnalogChannel
//! - `MockSerial`: Test implementation of SerialPort
//! - `MockDelay`: Delay provider that records requested waits
//! - Divider voltages for common test scenarios

#![allow(dead_code)]

use ntc_monitor::{AnalogChannel, ChannelSettings, SerialPort};
use std::collections::VecDeque;

// ============================================================================
// Divider voltages (3.3 V supply, 10 kOhm reference)
// ============================================================================

/// Half the supply: thermistor at 10 kOhm, 24.85 Celsius with the default model.
pub const MID_SCALE_UV: i32 = 1_650_000;

/// Full scale: divider saturated, conversion undefined.
pub const FULL_SCALE_UV: i32 = 3_300_000;

/// Ground: zero resistance, conversion undefined.
pub const GROUND_UV: i32 = 0;

// ============================================================================
// MockAnalog - Test ADC Channel
// ============================================================================

/// Mock ADC channel.
///
/// Returns queued readings in order, then repeats the last one.
#[derive(Debug)]
pub struct MockAnalog {
    /// Queued readings in microvolts
    readings: VecDeque<i32>,

    /// Returned once the queue is drained
    last: i32,

    /// Whether `configure` succeeds
    accept_configuration: bool,

    /// Settings passed to `configure`
    pub configured: Option<ChannelSettings>,

    /// Number of conversions taken
    pub conversions: usize,
}

impl MockAnalog {
    /// Channel that always reads `uv`.
    pub fn constant(uv: i32) -> Self {
        Self::with_readings(&[uv])
    }

    /// Channel that reads `readings` in order.
    pub fn with_readings(readings: &[i32]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            last: readings.last().copied().unwrap_or(0),
            accept_configuration: true,
            configured: None,
            conversions: 0,
        }
    }

    /// Channel whose configuration is rejected.
    pub fn rejecting() -> Self {
        Self {
            accept_configuration: false,
            ..Self::constant(MID_SCALE_UV)
        }
    }
}

impl AnalogChannel for MockAnalog {
    type Error = ();

    fn configure(&mut self, settings: &ChannelSettings) -> Result<(), Self::Error> {
        if !self.accept_configuration {
            return Err(());
        }
        self.configured = Some(*settings);
        Ok(())
    }

    fn read_microvolts(&mut self) -> i32 {
        self.conversions += 1;
        if let Some(uv) = self.readings.pop_front() {
            self.last = uv;
        }
        self.last
    }
}

// ============================================================================
// MockSerial - Test Serial Port
// ============================================================================

/// Mock serial port.
///
/// Provides an input byte queue and output capture.
#[derive(Debug, Default)]
pub struct MockSerial {
    /// Input queue (simulates bytes from the host)
    input: VecDeque<u8>,

    /// Output capture
    output: String,

    /// Fail every write when set
    pub fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serial port whose writes always fail.
    pub fn broken() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Queue bytes as if sent by the host.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Captured output.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Captured output split on `\r\n`, without the trailing empty entry.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.output.split("\r\n").collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }
        lines
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Bytes not yet read.
    pub fn input_len(&self) -> usize {
        self.input.len()
    }
}

impl SerialPort for MockSerial {
    type Error = ();

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.input.pop_front())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(());
        }
        self.output.push_str(&String::from_utf8_lossy(bytes));
        Ok(())
    }
}

// ============================================================================
// MockDelay - Recording Delay Provider
// ============================================================================

/// Delay provider that returns immediately and records each wait in ms.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all recorded waits.
    pub fn total_ms(&self) -> u64 {
        self.waits_ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
