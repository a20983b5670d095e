//! Beta-parameter temperature estimation for an NTC divider.
//!
//! Pure conversion from a measured divider voltage to degrees Celsius. The
//! divider places the reference resistor on the supply side and the
//! thermistor on the ground side, so a lower measured voltage means a lower
//! thermistor resistance and therefore a warmer sensor.
//!
//! Every step that can leave the real domain is guarded: the estimator returns
//! [`Temperature::Undefined`] with the failing step instead of NaN or infinity.

use crate::config::MonitorConfig;
use core::fmt;

/// Offset between kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f32 = 273.15;

/// Why a conversion produced no temperature.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UndefinedReason {
    /// Measured voltage at or above the supply (open thermistor or shorted reference)
    DividerSaturated,

    /// Computed thermistor resistance is zero or negative
    NonPositiveResistance,

    /// `beta - ln(r_ref / r) * t0` is zero or negative
    SingularDenominator,

    /// An input or intermediate value is NaN or infinite
    NonFinite,
}

impl UndefinedReason {
    /// Short description used in diagnostic lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DividerSaturated => "divider saturated",
            Self::NonPositiveResistance => "non-positive thermistor resistance",
            Self::SingularDenominator => "singular beta denominator",
            Self::NonFinite => "non-finite value",
        }
    }
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one conversion.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Temperature {
    /// Finite temperature in degrees Celsius
    Celsius(f32),

    /// Conversion is mathematically invalid for the given inputs
    Undefined(UndefinedReason),
}

impl Temperature {
    /// Celsius value, or `None` when undefined.
    pub fn celsius(&self) -> Option<f32> {
        match self {
            Temperature::Celsius(c) => Some(*c),
            Temperature::Undefined(_) => None,
        }
    }

    /// Whether the conversion failed.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Temperature::Undefined(_))
    }
}

/// Calibration constants of a thermistor divider.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermistorModel {
    /// Reference resistor, ohms
    pub r_ref_ohms: f32,

    /// Beta constant, kelvin
    pub beta: f32,

    /// Calibration temperature, kelvin
    pub t0_kelvin: f32,
}

impl ThermistorModel {
    /// Create a model from explicit constants.
    pub const fn new(r_ref_ohms: f32, beta: f32, t0_kelvin: f32) -> Self {
        Self {
            r_ref_ohms,
            beta,
            t0_kelvin,
        }
    }

    /// Model described by a compile-time configuration.
    pub const fn from_config<C: MonitorConfig>() -> Self {
        Self::new(C::R_REF_OHMS, C::BETA, C::T0_KELVIN)
    }

    /// Thermistor resistance for a measured divider voltage.
    ///
    /// `v_out` and `v_supply` must share a unit.
    pub fn resistance(&self, v_out: f32, v_supply: f32) -> Result<f32, UndefinedReason> {
        if !(v_out.is_finite() && v_supply.is_finite() && self.r_ref_ohms.is_finite()) {
            return Err(UndefinedReason::NonFinite);
        }
        if v_out >= v_supply {
            return Err(UndefinedReason::DividerSaturated);
        }

        let r_thermistor = self.r_ref_ohms * v_out / (v_supply - v_out);
        if !r_thermistor.is_finite() {
            return Err(UndefinedReason::NonFinite);
        }
        if r_thermistor <= 0.0 {
            return Err(UndefinedReason::NonPositiveResistance);
        }
        Ok(r_thermistor)
    }

    /// Estimate the temperature for a measured divider voltage.
    pub fn estimate(&self, v_out: f32, v_supply: f32) -> Temperature {
        match self.kelvin(v_out, v_supply) {
            Ok(t_kelvin) => Temperature::Celsius(t_kelvin - KELVIN_OFFSET),
            Err(reason) => Temperature::Undefined(reason),
        }
    }

    fn kelvin(&self, v_out: f32, v_supply: f32) -> Result<f32, UndefinedReason> {
        if !(self.beta.is_finite() && self.t0_kelvin.is_finite()) {
            return Err(UndefinedReason::NonFinite);
        }

        let r_thermistor = self.resistance(v_out, v_supply)?;
        let log_ratio = libm::logf(self.r_ref_ohms / r_thermistor);
        if !log_ratio.is_finite() {
            return Err(UndefinedReason::NonFinite);
        }

        // Zero is the singular case; below zero the result is negative kelvin.
        let denominator = self.beta - log_ratio * self.t0_kelvin;
        if denominator <= 0.0 {
            return Err(UndefinedReason::SingularDenominator);
        }

        let t_kelvin = self.beta * self.t0_kelvin / denominator;
        if !t_kelvin.is_finite() {
            return Err(UndefinedReason::NonFinite);
        }
        Ok(t_kelvin)
    }
}

/// Estimate a temperature from the five raw inputs.
///
/// Convenience form of [`ThermistorModel::estimate`].
pub fn estimate_celsius(
    v_out: f32,
    v_supply: f32,
    r_ref_ohms: f32,
    beta: f32,
    t0_kelvin: f32,
) -> Temperature {
    ThermistorModel::new(r_ref_ohms, beta, t0_kelvin).estimate(v_out, v_supply)
}
