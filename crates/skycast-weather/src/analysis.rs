//! Statistical aggregation over a converted record set.
//!
//! Every summary field is computed independently and defensively: an empty
//! or partially-populated record set yields absent fields that format as
//! the literal `"N/A"`, never NaN and never a panic.

use serde::{Deserialize, Serialize};

use crate::types::{
    CurrentConditions, ForecastDay, TemperatureUnit, UnitPreferences, YearlyRecord,
};
use crate::units;

/// Policy constants for the aggregator. These are defaults;
/// all of them can be overridden through the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisPolicy {
    /// A year counts as "rainy" when precipitation exceeds this (mm).
    pub rain_cutoff_mm: f64,
    /// Extreme-heat cutoff when displaying Celsius.
    pub extreme_heat_celsius: f64,
    /// Extreme-heat cutoff when displaying Fahrenheit.
    pub extreme_heat_fahrenheit: f64,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            rain_cutoff_mm: 0.5,
            extreme_heat_celsius: 35.0,
            extreme_heat_fahrenheit: 95.0,
        }
    }
}

impl AnalysisPolicy {
    /// Extreme-heat cutoff in the active display unit.
    pub fn extreme_heat_cutoff(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.extreme_heat_celsius,
            TemperatureUnit::Fahrenheit => self.extreme_heat_fahrenheit,
        }
    }
}

/// Derived statistics for one record set. Recomputed from scratch on every
/// fetch cycle and on every unit change; never incrementally updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub avg_max_temp: Option<f64>,
    pub pct_rain: Option<u8>,
    pub pct_extreme_heat: Option<u8>,
    pub avg_wind: Option<f64>,
    pub air_quality: Option<String>,
    /// Units the numeric fields are expressed in.
    pub units: UnitPreferences,
}

impl AnalysisSummary {
    /// True when no field carries data (nothing was fetched or nothing
    /// yielded a finite value).
    pub fn is_empty(&self) -> bool {
        self.avg_max_temp.is_none()
            && self.pct_rain.is_none()
            && self.pct_extreme_heat.is_none()
            && self.avg_wind.is_none()
            && self.air_quality.is_none()
    }

    pub fn avg_max_temp_display(&self) -> String {
        format_one_decimal(self.avg_max_temp)
    }

    pub fn pct_rain_display(&self) -> String {
        format_percent(self.pct_rain)
    }

    pub fn pct_extreme_heat_display(&self) -> String {
        format_percent(self.pct_extreme_heat)
    }

    pub fn avg_wind_display(&self) -> String {
        format_one_decimal(self.avg_wind)
    }

    pub fn air_quality_display(&self) -> String {
        self.air_quality.clone().unwrap_or_else(|| "N/A".to_string())
    }
}

/// One decimal place, or the `"N/A"` marker when absent.
pub fn format_one_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}"),
        _ => "N/A".to_string(),
    }
}

fn format_percent(value: Option<u8>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

/// Produce the display-unit copy of a raw record set.
///
/// Conversion happens exactly once, here, immediately after ingestion.
/// The raw records are left untouched so a later unit change can re-derive
/// from them instead of compounding conversions.
pub fn convert_records(raw: &[YearlyRecord], prefs: UnitPreferences) -> Vec<YearlyRecord> {
    raw.iter()
        .map(|r| YearlyRecord {
            year: r.year,
            max_temp: units::convert_temperature_opt(r.max_temp, prefs.temperature),
            precipitation: r.precipitation,
            wind_speed: units::convert_wind_opt(r.wind_speed, prefs.wind),
            air_quality: r.air_quality.clone(),
        })
        .collect()
}

/// Display-unit copy of a forecast day. Precipitation stays in mm.
pub fn convert_day(day: &ForecastDay, prefs: UnitPreferences) -> ForecastDay {
    ForecastDay {
        date: day.date,
        temperature: units::convert_temperature_opt(day.temperature, prefs.temperature),
        max_temp: units::convert_temperature_opt(day.max_temp, prefs.temperature),
        min_temp: units::convert_temperature_opt(day.min_temp, prefs.temperature),
        precipitation: day.precipitation,
        wind_speed: units::convert_wind_opt(day.wind_speed, prefs.wind),
        humidity: day.humidity,
        conditions: day.conditions.clone(),
    }
}

/// Display-unit copy of the current conditions.
pub fn convert_current(current: &CurrentConditions, prefs: UnitPreferences) -> CurrentConditions {
    CurrentConditions {
        temperature: units::convert_temperature_opt(current.temperature, prefs.temperature),
        max_temp: units::convert_temperature_opt(current.max_temp, prefs.temperature),
        min_temp: units::convert_temperature_opt(current.min_temp, prefs.temperature),
        precipitation: current.precipitation,
        wind_speed: units::convert_wind_opt(current.wind_speed, prefs.wind),
        humidity: current.humidity,
        conditions: current.conditions.clone(),
    }
}

/// Aggregate a converted record set into an [`AnalysisSummary`].
///
/// `air_quality` is the server-computed label passed through unmodified.
/// Percentages round half away from zero (`f64::round`).
pub fn analyze(
    records: &[YearlyRecord],
    prefs: UnitPreferences,
    policy: &AnalysisPolicy,
    air_quality: Option<String>,
) -> AnalysisSummary {
    let temps: Vec<f64> = records
        .iter()
        .filter_map(|r| r.max_temp)
        .filter(|t| t.is_finite())
        .collect();
    let avg_max_temp = mean(&temps);

    let total = records.len();
    let rainy = records
        .iter()
        .filter(|r| r.precipitation.is_some_and(|p| p > policy.rain_cutoff_mm))
        .count();
    let pct_rain = percent(rainy, total);

    let heat_cutoff = policy.extreme_heat_cutoff(prefs.temperature);
    let extreme = records
        .iter()
        .filter(|r| r.max_temp.is_some_and(|t| t > heat_cutoff))
        .count();
    let pct_extreme_heat = percent(extreme, total);

    let winds: Vec<f64> = records.iter().filter_map(|r| r.wind_speed).collect();
    let avg_wind = mean(&winds);

    AnalysisSummary {
        avg_max_temp,
        pct_rain,
        pct_extreme_heat,
        avg_wind,
        air_quality,
        units: prefs,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn percent(count: usize, total: usize) -> Option<u8> {
    if total == 0 {
        None
    } else {
        Some((100.0 * count as f64 / total as f64).round() as u8)
    }
}
