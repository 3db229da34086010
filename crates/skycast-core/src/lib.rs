//! Core infrastructure for Skycast: configuration, error hierarchy and
//! logging setup.

pub mod config;
pub mod error;

pub use config::{ApiConfig, Config, DashboardTuning, ValidationResult};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize tracing/logging. Call once at startup.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}
