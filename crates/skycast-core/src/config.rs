use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::ConfigError;

use skycast_weather::{AnalysisPolicy, RuleThresholds, ThresholdSet, UnitPreferences};

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// API endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// Display unit preferences
    #[serde(default)]
    pub units: UnitPreferences,

    /// User exceedance thresholds (all optional)
    #[serde(default)]
    pub thresholds: ThresholdSet,

    /// Aggregation policy constants (rain cutoff, extreme-heat cutoffs)
    #[serde(default)]
    pub policy: AnalysisPolicy,

    /// Suitability rule constants
    #[serde(default)]
    pub rules: RuleThresholds,

    /// Dashboard behavior tuning
    #[serde(default)]
    pub dashboard: DashboardTuning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Weather backend API root (profile, forecast and export endpoints)
    pub weather_base_url: String,

    /// Geocoding endpoint (Nominatim-compatible)
    pub geocode_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            weather_base_url: "http://localhost:5443/api/v1".to_string(),
            geocode_base_url: "https://nominatim.openstreetmap.org".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardTuning {
    /// Idle window before a map drag/click triggers a fetch (ms)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Initial map location when geolocation is unavailable
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_latitude() -> f64 {
    2.3073
}

fn default_longitude() -> f64 {
    112.9335
}

impl Default for DashboardTuning {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast");

        Self {
            config_dir,
            api: ApiConfig::default(),
            units: UnitPreferences::default(),
            thresholds: ThresholdSet::default(),
            policy: AnalysisPolicy::default(),
            rules: RuleThresholds::default(),
            dashboard: DashboardTuning::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        Ok(Self::from_toml(&contents)?)
    }

    /// Parse a configuration document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration and validate it.
    ///
    /// Returns the config along with any validation warnings; fails on
    /// critical validation errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.weather_base_url, "api.weather_base_url", &mut result);
        self.validate_url(&self.api.geocode_base_url, "api.geocode_base_url", &mut result);

        if self.dashboard.debounce_ms == 0 {
            result.add_warning(
                "dashboard.debounce_ms",
                "Zero debounce window; every map event triggers a fetch",
            );
        } else if self.dashboard.debounce_ms > 2000 {
            result.add_warning(
                "dashboard.debounce_ms",
                "Debounce window over 2s will feel unresponsive",
            );
        }

        let lat = self.dashboard.default_latitude;
        if !(-90.0..=90.0).contains(&lat) {
            result.add_error("dashboard.default_latitude", "Latitude must be in [-90, 90]");
        }
        let lon = self.dashboard.default_longitude;
        if !(-180.0..=180.0).contains(&lon) {
            result.add_error("dashboard.default_longitude", "Longitude must be in [-180, 180]");
        }

        if !self.policy.rain_cutoff_mm.is_finite() || self.policy.rain_cutoff_mm < 0.0 {
            result.add_error("policy.rain_cutoff_mm", "Rain cutoff must be a non-negative number");
        }
        for (field, pct) in [
            ("rules.hiking_rain_pct", self.rules.hiking_rain_pct),
            ("rules.beach_rain_pct", self.rules.beach_rain_pct),
            ("rules.cycling_rain_pct", self.rules.cycling_rain_pct),
            ("rules.event_rain_pct", self.rules.event_rain_pct),
        ] {
            if pct > 100 {
                result.add_error(field, "Percentage rule must be at most 100");
            }
        }

        result
    }

    fn validate_url(&self, url: &str, field: &str, result: &mut ValidationResult) {
        match Url::parse(url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    result.add_error(field, "URL must use http or https");
                }
            }
            Err(e) => result.add_error(field, format!("Invalid URL: {e}")),
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("system config directory unavailable".to_string()))?
            .join("skycast");
        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        let validation = config.validate();
        assert!(validation.is_valid(), "{}", validation.error_summary());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.weather_base_url, config.api.weather_base_url);
        assert_eq!(parsed.dashboard.debounce_ms, 250);
        assert_eq!(parsed.policy.rain_cutoff_mm, 0.5);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            config_dir = "/tmp/skycast"

            [units]
            temperature = "fahrenheit"
            wind = "kilometers_per_hour"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.policy.extreme_heat_celsius, 35.0);
        assert_eq!(parsed.rules.hiking_rain_pct, 40);
        assert_eq!(
            parsed.units.temperature,
            skycast_weather::TemperatureUnit::Fahrenheit
        );
    }

    #[test]
    fn malformed_toml_is_a_typed_parse_error() {
        let err = Config::from_toml("config_dir = [not valid").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.user_message().contains("malformed"));
    }

    #[test]
    fn well_formed_document_parses() {
        let config = Config::from_toml(r#"config_dir = "/tmp/skycast""#).unwrap();
        assert_eq!(config.dashboard.debounce_ms, 250);
    }

    #[test]
    fn bad_url_fails_validation() {
        let mut config = Config::default();
        config.api.weather_base_url = "not a url".to_string();
        let validation = config.validate();
        assert!(!validation.is_valid());
        assert!(validation.error_summary().contains("api.weather_base_url"));
    }

    #[test]
    fn out_of_range_default_location_fails_validation() {
        let mut config = Config::default();
        config.dashboard.default_latitude = 123.0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn oversized_debounce_is_a_warning_not_error() {
        let mut config = Config::default();
        config.dashboard.debounce_ms = 5000;
        let validation = config.validate();
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
    }
}
