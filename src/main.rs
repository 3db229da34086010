use std::time::Duration;

use anyhow::Result;

use skycast_core::Config;
use skycast_dashboard::Dashboard;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    skycast_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Skycast started");

    println!("Skycast - Weather Dashboard");
    println!("Configuration:");
    println!("  Config file: {}", Config::config_path()?.display());
    println!("  Weather API: {}", config.api.weather_base_url);
    println!(
        "  Default location: {:.4}, {:.4}",
        config.dashboard.default_latitude, config.dashboard.default_longitude
    );

    let mut dashboard = Dashboard::from_config(&config)?;
    dashboard.refresh();

    // Poll for the fetch outcome instead of sleeping a fixed interval. A
    // failed fetch surfaces as the session error, not a crash.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while dashboard.process_messages() == 0 {
        if tokio::time::Instant::now() >= deadline {
            println!("\nNo response from the weather API within 10s.");
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let session = dashboard.session();
    if let Some(error) = session.error() {
        tracing::error!("Fetch failed: {error}");
        println!("\n{}", error.user_message());
        return Ok(());
    }

    if let Some(snapshot) = session.profile() {
        let units = session.units();
        println!("\nWeather profile ({} records):", snapshot.records.len());
        println!(
            "  Avg max temp: {}°{}",
            snapshot.summary.avg_max_temp_display(),
            units.temperature.label()
        );
        println!("  Chance of rain: {}%", snapshot.summary.pct_rain_display());
        println!(
            "  Extreme heat: {}%",
            snapshot.summary.pct_extreme_heat_display()
        );
        println!(
            "  Avg wind: {} {}",
            snapshot.summary.avg_wind_display(),
            units.wind.label()
        );
        println!("  Air quality: {}", snapshot.summary.air_quality_display());

        println!("\nSuitability:");
        for verdict in &snapshot.verdicts {
            match &verdict.reason {
                None => println!("  {}: suitable", verdict.activity.name()),
                Some(reason) => {
                    println!("  {}: not suitable - {}", verdict.activity.name(), reason);
                }
            }
        }
    } else {
        println!("\nNo data received yet.");
    }

    Ok(())
}
