use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Short label used in headers and reason strings ("C" / "F")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// Wind speed display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WindUnit {
    #[default]
    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
}

impl WindUnit {
    /// Short label used in headers and reason strings
    pub fn label(&self) -> &'static str {
        match self {
            Self::MetersPerSecond => "m/s",
            Self::KilometersPerHour => "km/h",
            Self::MilesPerHour => "mph",
        }
    }
}

/// User-selected display units. Process-lifetime; every re-run of the
/// pipeline reads the current value, never a captured copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnitPreferences {
    pub temperature: TemperatureUnit,
    pub wind: WindUnit,
}

/// Geographic location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
        }
    }
}

/// One observed year in the historical profile.
///
/// Native units at the API boundary: Celsius, millimeters, meters/second.
/// Absent values stay absent; zero is a valid reading and is never used as
/// a stand-in for "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    #[serde(default)]
    pub max_temp: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub air_quality: Option<String>,
}

/// Server-side aggregate shipped with the profile payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    #[serde(rename = "avgAirQuality", default)]
    pub avg_air_quality: Option<String>,
}

/// Historical-profile API response: one row per observed year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(rename = "rawData", default)]
    pub raw_data: Vec<YearlyRecord>,
    #[serde(rename = "dataAnalysis", default)]
    pub data_analysis: Option<ProfileAnalysis>,
}

/// Current conditions in the forecast payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_temp: Option<f64>,
    #[serde(default)]
    pub min_temp: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "de_humidity")]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub conditions: Option<String>,
}

/// One day in the 7-day forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_temp: Option<f64>,
    #[serde(default)]
    pub min_temp: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "de_humidity")]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub conditions: Option<String>,
}

/// User-defined exceedance thresholds, expressed in current display units.
/// An absent field means no probability query for that variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(rename = "windSpeed", skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

impl ThresholdSet {
    /// True when no threshold is set at all
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.precipitation.is_none() && self.wind_speed.is_none()
    }
}

/// Server-computed exceedance probabilities (percent). Consumed, never
/// computed client-side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExceedanceProbabilities {
    #[serde(default)]
    pub temperature_above: Option<f64>,
    #[serde(default)]
    pub precipitation_above: Option<f64>,
    #[serde(default)]
    pub windspeed_above: Option<f64>,
}

/// Forecast API response: current conditions plus a 7-day outlook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub nasa_mission: Option<String>,
    #[serde(default)]
    pub probabilities: Option<ExceedanceProbabilities>,
    #[serde(default)]
    pub user_thresholds: Option<ThresholdSet>,
}

/// Weather API and geocoding errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx response; the body text is folded into the message.
    #[error("{status} {status_text} {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Humidity arrives either as a number or as a "64%" style string.
fn de_humidity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_humidity))
}

fn parse_humidity(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}
