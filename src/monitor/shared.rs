//! Tear-free sampling configuration for interrupt-driven command handling.
//!
//! When command bytes are consumed in a UART interrupt instead of being polled
//! by the loop, the interrupt handler and the loop share the configuration.
//! `SharedSamplingConfig` packs the interval and the reporting flag into one
//! atomic word, so a reader never observes a half-applied command.
//!
//! Layout: bit 31 = paused, bits 0..31 = interval in milliseconds.
//!
//! ```rust,ignore
//! static CONFIG: SharedSamplingConfig = SharedSamplingConfig::new(SamplingConfig::new());
//!
//! #[interrupt]
//! fn UART0() {
//!     if let Some(byte) = uart_read() {
//!         let ack = CONFIG.handle_byte(byte).acknowledgment;
//!         queue_ack(ack);
//!     }
//! }
//!
//! loop {
//!     monitor.tick_shared(&CONFIG).ok();
//!     while let Some(ack) = take_ack() {
//!         monitor.write_acknowledgment(ack).ok();
//!     }
//! }
//! ```

use super::command::{Command, Interpretation, interpret};
use super::sampling::{DEFAULT_INTERVAL_MS, SamplingConfig};
use crate::error::MonitorError;
use core::num::NonZeroU32;
use portable_atomic::{AtomicU32, Ordering};

const PAUSED_BIT: u32 = 1 << 31;
const INTERVAL_MASK: u32 = PAUSED_BIT - 1;

/// Largest interval representable in the packed word.
pub const MAX_SHARED_INTERVAL_MS: u32 = INTERVAL_MASK;

/// Callers check the interval against `MAX_SHARED_INTERVAL_MS` first.
const fn pack(config: SamplingConfig) -> u32 {
    let interval = config.interval_ms() & INTERVAL_MASK;
    if config.reporting_active() {
        interval
    } else {
        interval | PAUSED_BIT
    }
}

const fn unpack(word: u32) -> SamplingConfig {
    let interval_ms = match NonZeroU32::new(word & INTERVAL_MASK) {
        Some(ms) => ms,
        None => DEFAULT_INTERVAL_MS,
    };
    SamplingConfig::from_parts(interval_ms, word & PAUSED_BIT == 0)
}

/// Sampling configuration shared between an interrupt handler and the loop.
#[derive(Debug)]
pub struct SharedSamplingConfig {
    word: AtomicU32,
}

impl SharedSamplingConfig {
    /// Create with an initial configuration (usable in `static`).
    ///
    /// # Panics
    ///
    /// If the interval exceeds [`MAX_SHARED_INTERVAL_MS`]. In a `static`
    /// initializer this fails to compile.
    pub const fn new(initial: SamplingConfig) -> Self {
        assert!(
            initial.interval_ms() <= MAX_SHARED_INTERVAL_MS,
            "interval too large for SharedSamplingConfig"
        );
        Self {
            word: AtomicU32::new(pack(initial)),
        }
    }

    /// Create with an initial configuration, rejecting unrepresentable
    /// intervals with [`MonitorError::InvalidInterval`].
    pub fn try_new(initial: SamplingConfig) -> Result<Self, MonitorError> {
        if initial.interval_ms() > MAX_SHARED_INTERVAL_MS {
            return Err(MonitorError::InvalidInterval);
        }
        Ok(Self::new(initial))
    }

    /// Consistent snapshot of the configuration.
    pub fn load(&self) -> SamplingConfig {
        unpack(self.word.load(Ordering::Acquire))
    }

    /// Replace the configuration.
    ///
    /// Intervals above [`MAX_SHARED_INTERVAL_MS`] are rejected.
    pub fn store(&self, config: SamplingConfig) -> Result<(), MonitorError> {
        if config.interval_ms() > MAX_SHARED_INTERVAL_MS {
            return Err(MonitorError::InvalidInterval);
        }
        self.word.store(pack(config), Ordering::Release);
        Ok(())
    }

    /// Apply a command atomically. Returns the configuration it was applied to.
    pub fn apply(&self, command: Command) -> SamplingConfig {
        let previous = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                let mut config = unpack(word);
                config.apply(command);
                Some(pack(config))
            })
            .unwrap_or_else(|word| word);
        unpack(previous)
    }

    /// Interpret and apply one command byte atomically.
    ///
    /// The acknowledgment reflects the configuration the command was actually
    /// applied to, even when another writer raced this one.
    pub fn handle_byte(&self, byte: u8) -> Interpretation {
        let command = Command::from_byte(byte);
        let applied_to = self.apply(command);
        interpret(byte, &applied_to)
    }
}

impl Default for SharedSamplingConfig {
    fn default() -> Self {
        Self::new(SamplingConfig::new())
    }
}
