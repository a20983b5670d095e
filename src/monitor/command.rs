//! Single-byte command interpreter.
//!
//! Translates one received byte into a [`Command`] and the acknowledgment
//! text to send back. This is a pure function of the byte and the current
//! [`SamplingConfig`]; applying the command is left to the control loop.
//!
//! | byte  | command             | acknowledgment                   |
//! |-------|---------------------|----------------------------------|
//! | `s`   | `ToggleReporting`   | `paused` / `resumed`             |
//! | `1`   | `SetInterval(1)`    | `interval set to 1 second`       |
//! | `2`   | `SetInterval(2)`    | `interval set to 2 seconds`      |
//! | other | `Unknown(byte)`     | `incorrect input`                |

use super::sampling::{ReportingState, SamplingConfig};
use core::fmt;
use core::num::NonZeroU8;

/// Runtime command decoded from one byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Pause when active, resume when paused
    ToggleReporting,

    /// Change the sampling interval to the given number of seconds
    SetInterval(NonZeroU8),

    /// Unrecognized byte (no state change)
    Unknown(u8),
}

impl Command {
    /// Decode a byte. Every byte maps to exactly one command.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b's' => Command::ToggleReporting,
            b'1' => Command::SetInterval(NonZeroU8::MIN),
            b'2' => match NonZeroU8::new(2) {
                Some(seconds) => Command::SetInterval(seconds),
                None => Command::Unknown(byte),
            },
            _ => Command::Unknown(byte),
        }
    }
}

/// Acknowledgment sent after a command byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Acknowledgment {
    /// Reporting was active and is now paused
    Paused,

    /// Reporting was paused and is now active
    Resumed,

    /// Interval changed to the given number of seconds
    IntervalSet(NonZeroU8),

    /// Byte not recognized
    IncorrectInput,
}

impl fmt::Display for Acknowledgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acknowledgment::Paused => f.write_str("paused"),
            Acknowledgment::Resumed => f.write_str("resumed"),
            Acknowledgment::IntervalSet(seconds) if seconds.get() == 1 => {
                f.write_str("interval set to 1 second")
            }
            Acknowledgment::IntervalSet(seconds) => {
                write!(f, "interval set to {} seconds", seconds)
            }
            Acknowledgment::IncorrectInput => f.write_str("incorrect input"),
        }
    }
}

/// Interpreter output for one byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interpretation {
    /// Command to apply
    pub command: Command,

    /// Text to send back
    pub acknowledgment: Acknowledgment,
}

/// Interpret one byte against the configuration it would be applied to.
///
/// The toggle acknowledgment is computed from the state before toggling.
pub fn interpret(byte: u8, config: &SamplingConfig) -> Interpretation {
    let command = Command::from_byte(byte);
    let acknowledgment = match command {
        Command::ToggleReporting => match config.state() {
            ReportingState::Active => Acknowledgment::Paused,
            ReportingState::Paused => Acknowledgment::Resumed,
        },
        Command::SetInterval(seconds) => Acknowledgment::IntervalSet(seconds),
        Command::Unknown(_) => Acknowledgment::IncorrectInput,
    };

    Interpretation {
        command,
        acknowledgment,
    }
}

/// Interpret one byte and return the resulting configuration.
///
/// The input configuration is not modified.
pub fn transition(byte: u8, config: SamplingConfig) -> (SamplingConfig, Acknowledgment) {
    let interpretation = interpret(byte, &config);
    let mut next = config;
    next.apply(interpretation.command);
    (next, interpretation.acknowledgment)
}
