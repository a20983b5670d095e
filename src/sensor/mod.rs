//! Analog input sampling.
//!
//! `AnalogSampler` owns one platform ADC channel, applies the single-shot
//! channel settings once at startup and produces one calibrated voltage
//! reading per call. The conversion math lives in [`estimator`].

use crate::error::MonitorError;

pub mod estimator;

pub use estimator::{Temperature, ThermistorModel, UndefinedReason};

/// Voltage reference of a single-ended channel.
///
/// The divider is fed from the supply rail; readings are ratiometric to it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoltageReference {
    /// Analog supply rail (VDDA), negative input tied to VSSA
    Supply,
}

/// Channel settings handed to the platform driver at startup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSettings {
    /// Background scanning (always false for the monitor)
    pub continuous_scanning: bool,

    /// Hardware average count (1 = averaging disabled)
    pub average_count: u8,

    /// Conversion resolution in bits
    pub resolution_bits: u8,

    /// Positive reference
    pub reference: VoltageReference,

    /// Minimum acquisition time in nanoseconds
    pub min_acquisition_ns: u32,
}

impl ChannelSettings {
    /// Single-shot, unaveraged, 12-bit conversion against the given reference.
    pub const fn single_shot(reference: VoltageReference) -> Self {
        Self {
            continuous_scanning: false,
            average_count: 1,
            resolution_bits: 12,
            reference,
            min_acquisition_ns: 1000,
        }
    }
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self::single_shot(VoltageReference::Supply)
    }
}

/// One conversion result in microvolts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReading(i32);

impl RawReading {
    /// Wrap a microvolt value returned by the platform driver.
    pub const fn from_microvolts(uv: i32) -> Self {
        Self(uv)
    }

    /// Reading in microvolts.
    pub const fn microvolts(&self) -> i32 {
        self.0
    }

    /// Reading in millivolts (the unit of `MonitorConfig::SUPPLY_MV`).
    pub fn millivolts(&self) -> f32 {
        self.0 as f32 / 1000.0
    }
}

/// Platform ADC channel capability.
///
/// Implemented by the board support code on top of the vendor HAL. The
/// library never touches registers directly.
pub trait AnalogChannel {
    /// Platform-specific error type
    type Error;

    /// Apply channel settings. Called once, before the first read.
    fn configure(&mut self, settings: &ChannelSettings) -> Result<(), Self::Error>;

    /// Trigger one conversion and return the calibrated result in microvolts.
    ///
    /// Blocks only for the duration of a single hardware conversion.
    fn read_microvolts(&mut self) -> i32;
}

/// Single-channel sampler over a configured `AnalogChannel`.
#[derive(Debug)]
pub struct AnalogSampler<A: AnalogChannel> {
    channel: A,
    settings: ChannelSettings,
    label: &'static str,
}

impl<A: AnalogChannel> AnalogSampler<A> {
    /// Configure the channel and take ownership of it.
    ///
    /// A rejected configuration is an unrecoverable startup error.
    pub fn initialize(
        mut channel: A,
        label: &'static str,
        settings: ChannelSettings,
    ) -> Result<Self, MonitorError> {
        channel
            .configure(&settings)
            .map_err(|_| MonitorError::ChannelConfiguration)?;

        #[cfg(feature = "defmt")]
        defmt::info!("ADC channel {} configured: {}", label, settings);

        Ok(Self {
            channel,
            settings,
            label,
        })
    }

    /// Take one reading.
    pub fn read(&mut self) -> RawReading {
        RawReading::from_microvolts(self.channel.read_microvolts())
    }

    /// Settings applied at initialization.
    pub fn settings(&self) -> &ChannelSettings {
        &self.settings
    }

    /// Pin or channel name.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Mutable access to the underlying channel.
    pub fn channel_mut(&mut self) -> &mut A {
        &mut self.channel
    }
}
