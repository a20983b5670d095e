//! # ntc-monitor
//!
//! NTC thermistor sampling loop for embedded systems with zero heap allocation.
//!
//! **Key features:**
//! - **Guarded conversion** - Beta-parameter estimation that never yields NaN or infinity
//! - **Single-byte commands** - Pause/resume and cadence changes over the serial link
//! - **Platform seams** - `AnalogChannel`, `SerialPort` and `embedded-hal` delay traits
//! - **Const configuration** - Divider calibration defined at compile time
//! - **Interrupt-safe state** - Tear-free shared configuration for IRQ-driven input
//!
//! ## Optional Features
//!
//! - `async` - Async control loop over `embedded-hal-async` delays
//! - `defmt` - `defmt` logging and `defmt::Format` derives
//! - `host` - Host companion binary (serial logger and key forwarder, std only)
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate heapless;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod io;

pub mod error;

// Sampling and conversion
pub mod sensor;

// Output lines
pub mod report;

// Control loop, command interpreter, sampling state
pub mod monitor;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::SerialPort;

// Configuration
pub use config::{DefaultConfig, MonitorConfig, Ntc10kB3950Config};

// Error types
pub use error::MonitorError;

// Sensor types
pub use sensor::estimator::{Temperature, ThermistorModel, UndefinedReason, estimate_celsius};
pub use sensor::{AnalogChannel, AnalogSampler, ChannelSettings, RawReading, VoltageReference};

// Output
pub use report::Report;

// Control loop types
pub use monitor::{
    Acknowledgment, Command, Interpretation, Monitor, ReportingState, SamplingConfig,
    SharedSamplingConfig, TickOutcome, interpret, transition,
};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
