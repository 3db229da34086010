//! Weather API client.
//!
//! Thin `reqwest` wrapper over the dashboard backend: the historical-profile
//! endpoint (`weather?lat&lon&date`), the forecast endpoint
//! (`weather?lat&lon[&thresholds]`) and the server-proxied export download.
//! The base URL is injectable so tests can point it at a local mock server.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Response};
use url::Url;

use crate::types::{ForecastResponse, ProfileResponse, ThresholdSet, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Export formats the backend can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    client: Arc<Client>,
}

impl WeatherClient {
    /// Create a client for an API root, e.g. `http://localhost:5443/api/v1`.
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        let base_url = Url::parse(base_url).map_err(|e| WeatherError::Parse(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    /// Fetch the year-by-year historical profile for a location and date.
    pub async fn fetch_profile(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
    ) -> Result<ProfileResponse, WeatherError> {
        let mut url = self.endpoint("weather")?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string())
            .append_pair("date", &date.to_string());

        tracing::debug!("Fetching weather profile: {}", url);
        let body = read_success(self.client.get(url).send().await?).await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }

    /// Fetch current conditions plus the 7-day forecast. Thresholds, when
    /// set, ride along as a JSON-encoded query parameter so the server can
    /// compute exceedance probabilities.
    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        thresholds: Option<&ThresholdSet>,
    ) -> Result<ForecastResponse, WeatherError> {
        let mut url = self.endpoint("weather")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("lat", &lat.to_string())
                .append_pair("lon", &lon.to_string());
            if let Some(t) = thresholds.filter(|t| !t.is_empty()) {
                let encoded =
                    serde_json::to_string(t).map_err(|e| WeatherError::Parse(e.to_string()))?;
                pairs.append_pair("thresholds", &encoded);
            }
        }

        tracing::debug!("Fetching forecast: {}", url);
        let body = read_success(self.client.get(url).send().await?).await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }

    /// Download the server-composed export for a location.
    pub async fn download_export(
        &self,
        lat: f64,
        lon: f64,
        format: ExportFormat,
    ) -> Result<String, WeatherError> {
        let mut url = self.endpoint("export")?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string())
            .append_pair("format", format.as_str());

        tracing::debug!("Downloading export: {}", url);
        read_success(self.client.get(url).send().await?).await
    }

    fn endpoint(&self, name: &str) -> Result<Url, WeatherError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| WeatherError::Parse("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

/// Treat any non-2xx status as a hard failure, folding the body text into
/// the error so the UI can surface `"<status> <statusText> <body>"`.
async fn read_success(response: Response) -> Result<String, WeatherError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(WeatherError::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}
