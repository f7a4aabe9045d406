//! Physical Constants for Thermistor Modeling
//!
//! Centralized constants used throughout the crate. Steinhart-Hart
//! coefficients are always fit and evaluated against absolute temperature, so
//! the Celsius/Kelvin conversion appears at every boundary between user-facing
//! temperatures and model evaluation, so it is defined exactly once, here.

/// Absolute zero in Celsius (°C).
///
/// The theoretical lower limit of temperature where molecular motion ceases.
/// No physical system can reach temperatures below this value.
///
/// Source: NIST Special Publication 330 (2019)
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Offset between the Celsius and Kelvin scales.
///
/// Added to a Celsius reading to obtain absolute temperature. Equivalent to
/// `-ABSOLUTE_ZERO_CELSIUS`; kept as its own constant because it reads better
/// at the call sites that do the conversion.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Convert a Celsius temperature to Kelvin.
#[inline]
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Convert a Kelvin temperature to Celsius.
#[inline]
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}
