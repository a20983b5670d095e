//! Error types for monitor operations.
//!
//! `MonitorError` covers the startup failures that stop the firmware and the
//! configuration updates that are rejected. Invalid temperature conversions
//! are not errors; they are reported as [`Temperature::Undefined`].
//!
//! [`Temperature::Undefined`]: crate::sensor::estimator::Temperature::Undefined

use core::fmt;

/// Monitor error type.
///
/// Startup variants (`ChannelConfiguration`, `Transport`) are fatal: the
/// firmware entry point must halt instead of entering the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorError {
    /// Platform ADC channel rejected the channel settings
    ChannelConfiguration,

    /// Serial transport failed while writing the startup banner
    Transport,

    /// Sampling interval of zero, or too large for the shared word
    /// (configuration left unchanged)
    InvalidInterval,
}

impl MonitorError {
    /// Whether the error must stop the firmware.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MonitorError::ChannelConfiguration | MonitorError::Transport
        )
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::ChannelConfiguration => write!(f, "ADC channel configuration failed"),
            MonitorError::Transport => write!(f, "Serial transport failed"),
            MonitorError::InvalidInterval => write!(f, "Interval out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::format;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", MonitorError::ChannelConfiguration),
            "ADC channel configuration failed"
        );
        assert_eq!(
            format!("{}", MonitorError::Transport),
            "Serial transport failed"
        );
        assert_eq!(
            format!("{}", MonitorError::InvalidInterval),
            "Interval out of range"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(MonitorError::ChannelConfiguration.is_fatal());
        assert!(MonitorError::Transport.is_fatal());
        assert!(!MonitorError::InvalidInterval.is_fatal());
    }
}
