//! Output line formatting.
//!
//! `Report` is everything the control loop writes after startup: temperature
//! lines, diagnostics for undefined conversions and command acknowledgments.
//! Lines are rendered into fixed-capacity buffers (no heap).

use crate::monitor::command::Acknowledgment;
use crate::sensor::estimator::{Temperature, UndefinedReason};
use core::fmt::{self, Write};

/// Capacity of one rendered line (without line ending).
pub const MAX_LINE: usize = 64;

/// ANSI clear screen and cursor home, sent before the banner.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[;H";

/// Horizontal rule framing the banner title.
pub const RULE: &str = "-----------------------------------------------------------";

/// One line of loop output.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// `TEMPERATURE <value> Celsius`, two fractional digits
    Temperature(f32),

    /// Conversion could not produce a temperature
    Undefined(UndefinedReason),

    /// Reply to a command byte
    Acknowledgment(Acknowledgment),
}

impl Report {
    /// Line for a conversion result.
    pub fn from_temperature(temperature: Temperature) -> Self {
        match temperature {
            Temperature::Celsius(c) => Report::Temperature(c),
            Temperature::Undefined(reason) => Report::Undefined(reason),
        }
    }

    /// Render into a fixed-capacity string.
    ///
    /// Text beyond `MAX_LINE` is truncated.
    pub fn render(&self) -> heapless::String<MAX_LINE> {
        let mut line = heapless::String::new();
        write!(line, "{}", self).ok();
        line
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Temperature(c) => write!(f, "TEMPERATURE {:.2} Celsius", c),
            Report::Undefined(reason) => write!(f, "TEMPERATURE undefined ({})", reason),
            Report::Acknowledgment(ack) => write!(f, "{}", ack),
        }
    }
}

impl From<Acknowledgment> for Report {
    fn from(ack: Acknowledgment) -> Self {
        Report::Acknowledgment(ack)
    }
}

impl From<Temperature> for Report {
    fn from(temperature: Temperature) -> Self {
        Report::from_temperature(temperature)
    }
}
