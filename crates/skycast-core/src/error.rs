//! Centralized error types for the Skycast application.
//!
//! A typed hierarchy with `user_message()` strings suitable for the single
//! visible error slot in the UI; the full error is preserved for logging.

use thiserror::Error;

use skycast_weather::WeatherError;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for the visible error slot.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => match e {
                WeatherError::Network(_) => "Unable to reach the weather service. Check your internet connection.",
                WeatherError::Api { .. } => "The weather service reported an error. Please try again later.",
                WeatherError::Parse(_) => "Received an unexpected response from the weather service.",
            },
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_api_error_maps_to_service_message() {
        let err = AppError::from(WeatherError::Api {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: "upstream".to_string(),
        });
        assert!(err.user_message().contains("weather service"));
        // Full detail preserved for logging
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn config_error_messages() {
        let err = ConfigError::ParseError("line 3".to_string());
        assert!(err.user_message().contains("malformed"));
    }
}
