//! Compile-time configuration for the divider circuit and loop defaults.
//!
//! The `MonitorConfig` trait carries the calibration constants of the
//! thermistor divider and the startup cadence as associated consts, so a board
//! is described by a zero-sized type without runtime overhead.

/// Monitor configuration trait defining calibration constants and defaults.
///
/// All values are const (zero runtime cost). The divider topology is fixed:
/// supply -- reference resistor -- measurement pin -- thermistor -- ground.
pub trait MonitorConfig {
    /// Reference resistor of the divider, in ohms
    const R_REF_OHMS: f32;

    /// Thermistor beta (material) constant, in kelvin
    const BETA: f32;

    /// Calibration temperature at which the thermistor equals `R_REF_OHMS`, in kelvin
    const T0_KELVIN: f32;

    /// Divider excitation voltage, in millivolts
    const SUPPLY_MV: f32;

    /// Sampling interval at startup, in milliseconds. Must be non-zero.
    const DEFAULT_INTERVAL_MS: u32;

    /// Pin or channel name shown in the startup banner
    const CHANNEL_LABEL: &'static str;

    /// Board name shown in the startup banner
    const BOARD_NAME: &'static str;
}

/// Configuration of the reference board.
///
/// - R_REF_OHMS: 10 kΩ
/// - BETA: 3455 K
/// - T0_KELVIN: 298 K
/// - SUPPLY_MV: 3300 mV (VDDA)
/// - DEFAULT_INTERVAL_MS: 1000 ms
/// - CHANNEL_LABEL: P10_1
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl MonitorConfig for DefaultConfig {
    const R_REF_OHMS: f32 = 10_000.0;
    const BETA: f32 = 3455.0;
    const T0_KELVIN: f32 = 298.0;
    const SUPPLY_MV: f32 = 3300.0;
    const DEFAULT_INTERVAL_MS: u32 = 1000;
    const CHANNEL_LABEL: &'static str = "P10_1";
    const BOARD_NAME: &'static str = "PSoC 6 MCU: ADC using HAL";
}

/// Common 10 kΩ NTC with B = 3950 K, calibrated at 25 °C.
///
/// - R_REF_OHMS: 10 kΩ
/// - BETA: 3950 K
/// - T0_KELVIN: 298.15 K
/// - SUPPLY_MV: 3300 mV
/// - DEFAULT_INTERVAL_MS: 1000 ms
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ntc10kB3950Config;

impl MonitorConfig for Ntc10kB3950Config {
    const R_REF_OHMS: f32 = 10_000.0;
    const BETA: f32 = 3950.0;
    const T0_KELVIN: f32 = 298.15;
    const SUPPLY_MV: f32 = 3300.0;
    const DEFAULT_INTERVAL_MS: u32 = 1000;
    const CHANNEL_LABEL: &'static str = "A0";
    const BOARD_NAME: &'static str = "NTC 10K B3950 monitor";
}
