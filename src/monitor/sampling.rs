//! Sampling configuration owned by the control loop.
//!
//! `SamplingConfig` is the only state that survives a loop iteration. It is
//! changed exclusively by applying a [`Command`] produced by the interpreter.

use super::command::Command;
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use core::num::NonZeroU32;

/// Reporting state machine.
///
/// Two states, toggled by [`Command::ToggleReporting`] only. Initial state is
/// `Active`; there is no terminal state.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportingState {
    /// Temperatures are sampled and reported every tick
    Active = 0,

    /// Sampling and reporting are suspended; commands are still polled
    Paused = 1,
}

impl ReportingState {
    /// The other state.
    pub const fn toggled(self) -> Self {
        match self {
            ReportingState::Active => ReportingState::Paused,
            ReportingState::Paused => ReportingState::Active,
        }
    }
}

/// Interval used when nothing else is configured.
pub const DEFAULT_INTERVAL_MS: NonZeroU32 = NonZeroU32::new(1000).unwrap();

/// Interval and reporting flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplingConfig {
    interval_ms: NonZeroU32,
    reporting_active: bool,
}

impl SamplingConfig {
    /// 1000 ms interval, reporting active.
    pub const fn new() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            reporting_active: true,
        }
    }

    /// Startup configuration of a board.
    ///
    /// A zero `DEFAULT_INTERVAL_MS` fails to compile.
    pub const fn from_config<C: MonitorConfig>() -> Self {
        let interval_ms = const {
            match NonZeroU32::new(C::DEFAULT_INTERVAL_MS) {
                Some(ms) => ms,
                None => panic!("DEFAULT_INTERVAL_MS must be non-zero"),
            }
        };
        Self {
            interval_ms,
            reporting_active: true,
        }
    }

    /// Sampling interval in milliseconds (never zero).
    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms.get()
    }

    /// Sampling interval as a non-zero value.
    pub const fn interval(&self) -> NonZeroU32 {
        self.interval_ms
    }

    /// Whether temperatures are currently reported.
    pub const fn reporting_active(&self) -> bool {
        self.reporting_active
    }

    /// Current reporting state.
    pub const fn state(&self) -> ReportingState {
        if self.reporting_active {
            ReportingState::Active
        } else {
            ReportingState::Paused
        }
    }

    /// Set the interval, rejecting zero.
    pub fn set_interval_ms(&mut self, interval_ms: u32) -> Result<(), MonitorError> {
        self.interval_ms = NonZeroU32::new(interval_ms).ok_or(MonitorError::InvalidInterval)?;
        Ok(())
    }

    /// Apply a command. Returns true if the configuration changed.
    pub fn apply(&mut self, command: Command) -> bool {
        let before = *self;
        match command {
            Command::ToggleReporting => {
                self.reporting_active = !self.reporting_active;
            }
            Command::SetInterval(seconds) => {
                self.interval_ms = seconds_to_ms(seconds.get());
            }
            Command::Unknown(_) => {}
        }
        *self != before
    }

    pub(crate) const fn from_parts(interval_ms: NonZeroU32, reporting_active: bool) -> Self {
        Self {
            interval_ms,
            reporting_active,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole seconds to a non-zero millisecond interval.
pub(crate) const fn seconds_to_ms(seconds: u8) -> NonZeroU32 {
    match NonZeroU32::new(seconds as u32 * 1000) {
        Some(ms) => ms,
        None => DEFAULT_INTERVAL_MS,
    }
}
