//! Unit conversion. Pure and side-effect free.
//!
//! Conversions always start from the native API units (Celsius, m/s); the
//! caller keeps the raw payload around and re-derives display values from it
//! rather than chaining conversions, so re-running the pipeline with the
//! same unit always reproduces the same output.

use crate::types::{TemperatureUnit, WindUnit};

pub const MPS_TO_KMH: f64 = 3.6;
pub const MPS_TO_MPH: f64 = 2.237;

/// `c * 9/5 + 32`
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert a native-unit (Celsius) temperature to the display unit.
pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    }
}

/// Convert a native-unit (m/s) wind speed to the display unit.
pub fn convert_wind(mps: f64, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::MetersPerSecond => mps,
        WindUnit::KilometersPerHour => mps * MPS_TO_KMH,
        WindUnit::MilesPerHour => mps * MPS_TO_MPH,
    }
}

/// Absent readings pass through as absent; zero is a valid value and is
/// never substituted for a missing one.
pub fn convert_temperature_opt(celsius: Option<f64>, unit: TemperatureUnit) -> Option<f64> {
    celsius.map(|c| convert_temperature(c, unit))
}

pub fn convert_wind_opt(mps: Option<f64>, unit: WindUnit) -> Option<f64> {
    mps.map(|w| convert_wind(w, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_formula() {
        assert_eq!(convert_temperature(0.0, TemperatureUnit::Fahrenheit), 32.0);
        assert_eq!(convert_temperature(100.0, TemperatureUnit::Fahrenheit), 212.0);
        assert_eq!(convert_temperature(-40.0, TemperatureUnit::Fahrenheit), -40.0);
    }

    #[test]
    fn celsius_is_identity() {
        assert_eq!(convert_temperature(21.7, TemperatureUnit::Celsius), 21.7);
    }

    #[test]
    fn wind_factors_exact() {
        assert_eq!(convert_wind(10.0, WindUnit::KilometersPerHour), 36.0);
        assert_eq!(convert_wind(10.0, WindUnit::MilesPerHour), 22.37);
        assert_eq!(convert_wind(10.0, WindUnit::MetersPerSecond), 10.0);
    }

    #[test]
    fn no_double_conversion_drift() {
        // Re-deriving from the raw m/s value must equal a single conversion.
        let raw = 7.3_f64;
        let first = convert_wind(raw, WindUnit::KilometersPerHour);
        let rederived = convert_wind(raw, WindUnit::KilometersPerHour);
        assert_eq!(first, rederived);
        assert_eq!(first, raw * 3.6);
    }

    #[test]
    fn absence_passes_through() {
        assert_eq!(convert_wind_opt(None, WindUnit::KilometersPerHour), None);
        assert_eq!(convert_temperature_opt(None, TemperatureUnit::Fahrenheit), None);
        // Zero is a reading, not absence.
        assert_eq!(convert_wind_opt(Some(0.0), WindUnit::KilometersPerHour), Some(0.0));
    }
}
