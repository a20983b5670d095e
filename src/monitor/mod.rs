//! Control loop orchestration.
//!
//! `Monitor` brings the sampler, estimator and command interpreter together
//! over a serial port and a delay provider. Each tick runs the same fixed
//! sequence:
//!
//! 1. If reporting is active: sample, convert, write the temperature line
//!    (or a diagnostic line when the conversion is undefined).
//! 2. Suspend for the configured interval.
//! 3. Poll exactly one command byte (non-blocking); interpret, apply and
//!    acknowledge it.
//!
//! When command bytes arrive in an interrupt handler instead, the loop runs
//! `tick_shared` over a [`SharedSamplingConfig`] and skips step 3.

use crate::config::{DefaultConfig, MonitorConfig};
use crate::error::MonitorError;
use crate::io::SerialPort;
use crate::report::{CLEAR_SCREEN, RULE, Report};
use crate::sensor::estimator::{Temperature, ThermistorModel};
use crate::sensor::{AnalogChannel, AnalogSampler, ChannelSettings, VoltageReference};
use core::marker::PhantomData;

// Sub-modules
pub mod command;
pub mod sampling;
pub mod shared;

// Re-export key types
pub use command::{Acknowledgment, Command, Interpretation, interpret, transition};
pub use sampling::{ReportingState, SamplingConfig};
pub use shared::SharedSamplingConfig;

/// What one tick did.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Conversion result (None while reporting is paused)
    pub temperature: Option<Temperature>,

    /// Command received at the poll point, if any
    pub command: Option<Interpretation>,
}

/// Control loop.
///
/// Generic over:
/// - `A`: AnalogChannel implementation
/// - `S`: SerialPort implementation
/// - `D`: delay provider (`embedded_hal::delay::DelayNs`, or
///   `embedded_hal_async::delay::DelayNs` with the `async` feature)
/// - `C`: MonitorConfig implementation
pub struct Monitor<A, S, D, C = DefaultConfig>
where
    A: AnalogChannel,
    S: SerialPort,
    C: MonitorConfig,
{
    /// Configured ADC channel
    sampler: AnalogSampler<A>,

    /// Divider calibration
    model: ThermistorModel,

    /// Interval and reporting flag (only cross-iteration state)
    sampling: SamplingConfig,

    /// Report and command channel
    serial: S,

    /// Suspension primitive
    delay: D,

    /// Config type marker (zero-size)
    _config: PhantomData<C>,
}

// ============================================================================
// Debug implementation
// ============================================================================

impl<A, S, D, C> core::fmt::Debug for Monitor<A, S, D, C>
where
    A: AnalogChannel,
    S: SerialPort,
    C: MonitorConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Monitor")
            .field("channel", &self.sampler.label())
            .field("model", &self.model)
            .field("sampling", &self.sampling)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Startup and shared steps
// ============================================================================

impl<A, S, D, C> Monitor<A, S, D, C>
where
    A: AnalogChannel,
    S: SerialPort,
    C: MonitorConfig,
{
    /// Initialize the ADC channel and write the startup banner.
    ///
    /// Both failures are fatal: the caller must halt rather than run the loop.
    pub fn start(channel: A, serial: S, delay: D) -> Result<Self, MonitorError> {
        let sampler = AnalogSampler::initialize(
            channel,
            C::CHANNEL_LABEL,
            ChannelSettings::single_shot(VoltageReference::Supply),
        )?;

        let mut monitor = Self {
            sampler,
            model: ThermistorModel::from_config::<C>(),
            sampling: SamplingConfig::from_config::<C>(),
            serial,
            delay,
            _config: PhantomData,
        };

        monitor
            .write_banner()
            .map_err(|_| MonitorError::Transport)?;

        #[cfg(feature = "defmt")]
        defmt::info!("monitor started: {}", monitor.sampling);

        Ok(monitor)
    }

    /// Current interval and reporting flag.
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Divider calibration in use.
    pub fn model(&self) -> &ThermistorModel {
        &self.model
    }

    /// Serial port (for platform flushing and tests).
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Delay provider.
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Sampler and its channel.
    pub fn sampler_mut(&mut self) -> &mut AnalogSampler<A> {
        &mut self.sampler
    }

    /// Interpret one command byte and apply it to the configuration.
    ///
    /// Does not write the acknowledgment.
    pub fn handle_byte(&mut self, byte: u8) -> Interpretation {
        let interpretation = interpret(byte, &self.sampling);
        self.sampling.apply(interpretation.command);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "command {} -> {}",
            interpretation.command,
            self.sampling
        );

        interpretation
    }

    /// Poll for one command byte and handle it.
    ///
    /// Returns `Ok(None)` when nothing was received.
    pub fn poll_command(&mut self) -> Result<Option<Interpretation>, S::Error> {
        let Some(byte) = self.serial.try_read_byte()? else {
            return Ok(None);
        };

        let interpretation = self.handle_byte(byte);
        self.write_report(Report::from(interpretation.acknowledgment))?;
        Ok(Some(interpretation))
    }

    /// Write an acknowledgment produced outside the loop (see
    /// [`SharedSamplingConfig::handle_byte`]).
    pub fn write_acknowledgment(&mut self, ack: Acknowledgment) -> Result<(), S::Error> {
        self.write_report(Report::from(ack))
    }

    /// Take and convert one sample if reporting is active.
    fn sample(&mut self) -> Option<Temperature> {
        if !self.sampling.reporting_active() {
            return None;
        }

        let raw = self.sampler.read();
        let temperature = self.model.estimate(raw.millivolts(), C::SUPPLY_MV);

        #[cfg(feature = "defmt")]
        {
            match temperature {
                Temperature::Celsius(_) => {
                    defmt::debug!("{} uV -> {}", raw.microvolts(), temperature)
                }
                Temperature::Undefined(reason) => {
                    defmt::warn!("{} uV: conversion undefined ({})", raw.microvolts(), reason)
                }
            }
        }

        Some(temperature)
    }

    /// Sample and write the temperature (or diagnostic) line.
    fn report_step(&mut self) -> (Option<Temperature>, Result<(), S::Error>) {
        match self.sample() {
            Some(temperature) => {
                let written = self.write_report(Report::from(temperature));
                (Some(temperature), written)
            }
            None => (None, Ok(())),
        }
    }

    fn write_report(&mut self, report: Report) -> Result<(), S::Error> {
        let line = report.render();
        self.serial.write_line(&line)
    }

    fn write_banner(&mut self) -> Result<(), S::Error> {
        self.serial.write_str(CLEAR_SCREEN)?;
        self.serial.write_line(RULE)?;
        self.serial.write_line(C::BOARD_NAME)?;
        self.serial.write_line(RULE)?;
        self.serial.write_line("")?;
        self.serial
            .write_line("ADC is configured in single channel configuration")?;
        self.serial.write_line("")?;
        self.serial.write_str("Provide input voltage at pin ")?;
        self.serial.write_str(self.sampler.label())?;
        self.serial.write_line(".")?;
        self.serial.write_line("")
    }
}

// ============================================================================
// Blocking loop
// ============================================================================

impl<A, S, D, C> Monitor<A, S, D, C>
where
    A: AnalogChannel,
    S: SerialPort,
    D: embedded_hal::delay::DelayNs,
    C: MonitorConfig,
{
    /// Run one iteration.
    ///
    /// All three steps run even when a write fails; the first transport error
    /// is returned afterwards.
    pub fn tick(&mut self) -> Result<TickOutcome, S::Error> {
        let (temperature, reported) = self.report_step();

        embedded_hal::delay::DelayNs::delay_ms(&mut self.delay, self.sampling.interval_ms());

        let polled = self.poll_command();

        reported?;
        Ok(TickOutcome {
            temperature,
            command: polled?,
        })
    }

    /// Run forever. Transport errors are dropped; the loop never stops.
    pub fn run(mut self) -> ! {
        loop {
            self.tick().ok();
        }
    }

    /// Run one iteration with commands applied by an interrupt handler.
    ///
    /// One snapshot of `shared` decides both whether to sample and how long
    /// to wait. The serial port is not polled.
    pub fn tick_shared(
        &mut self,
        shared: &SharedSamplingConfig,
    ) -> Result<TickOutcome, S::Error> {
        self.sampling = shared.load();
        let (temperature, reported) = self.report_step();

        embedded_hal::delay::DelayNs::delay_ms(&mut self.delay, self.sampling.interval_ms());

        reported?;
        Ok(TickOutcome {
            temperature,
            command: None,
        })
    }

    /// Run forever on a shared configuration.
    pub fn run_shared(mut self, shared: &SharedSamplingConfig) -> ! {
        loop {
            self.tick_shared(shared).ok();
        }
    }
}

// ============================================================================
// Async loop
// ============================================================================

#[cfg(feature = "async")]
impl<A, S, D, C> Monitor<A, S, D, C>
where
    A: AnalogChannel,
    S: SerialPort,
    D: embedded_hal_async::delay::DelayNs,
    C: MonitorConfig,
{
    /// Run one iteration, awaiting the interval instead of blocking.
    pub async fn tick_async(&mut self) -> Result<TickOutcome, S::Error> {
        let (temperature, reported) = self.report_step();

        embedded_hal_async::delay::DelayNs::delay_ms(&mut self.delay, self.sampling.interval_ms())
            .await;

        let polled = self.poll_command();

        reported?;
        Ok(TickOutcome {
            temperature,
            command: polled?,
        })
    }

    /// Run forever on an async executor.
    pub async fn run_async(mut self) {
        loop {
            self.tick_async().await.ok();
        }
    }

    /// Async counterpart of [`Monitor::tick_shared`].
    pub async fn tick_shared_async(
        &mut self,
        shared: &SharedSamplingConfig,
    ) -> Result<TickOutcome, S::Error> {
        self.sampling = shared.load();
        let (temperature, reported) = self.report_step();

        embedded_hal_async::delay::DelayNs::delay_ms(&mut self.delay, self.sampling.interval_ms())
            .await;

        reported?;
        Ok(TickOutcome {
            temperature,
            command: None,
        })
    }
}
