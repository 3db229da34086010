//! Geocoding via Nominatim (OpenStreetMap) - free, no API key required.
//!
//! Forward search powers the location search box; reverse geocoding names a
//! dropped marker. Both fail soft: on any error the search yields an empty
//! suggestion list and reverse lookup yields `None`, with a debug log entry.
//! No geocoding failure ever becomes a user-facing error.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::types::Location;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Skycast/0.1.0 (https://github.com/skycast)";
/// Suggestion list cap for the search box
const MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Deserialize)]
struct SearchResult {
    // Nominatim ships coordinates as strings
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    base_url: Url,
    client: Arc<Client>,
}

impl GeocodeClient {
    pub fn new() -> Option<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Point the client at an alternate endpoint (used by tests).
    pub fn with_base_url(base_url: &str) -> Option<Self> {
        let base_url = match Url::parse(base_url) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Invalid geocoding base URL: {}", e);
                return None;
            }
        };
        let client = match Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to create geocoding client: {}", e);
                return None;
            }
        };
        Some(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    /// Free-text location search, capped at six suggestions.
    /// Any failure logs and returns an empty list.
    pub async fn search(&self, query: &str) -> Vec<Location> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut url = match self.endpoint("search") {
            Some(u) => u,
            None => return Vec::new(),
        };
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", &MAX_SUGGESTIONS.to_string());

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Geocode search request failed: {}", e);
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            tracing::debug!("Geocode search returned status {}", response.status());
            return Vec::new();
        }

        let results: Vec<SearchResult> = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Geocode search parse error: {}", e);
                return Vec::new();
            }
        };

        results
            .into_iter()
            .filter_map(|r| {
                // Skip entries with unparsable coordinates rather than failing
                let latitude: f64 = r.lat.parse().ok()?;
                let longitude: f64 = r.lon.parse().ok()?;
                Some(Location {
                    latitude,
                    longitude,
                    name: r.display_name,
                })
            })
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Reverse geocode coordinates to a display name for the marker.
    /// Returns `None` on failure; the caller falls back to raw coordinates.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Option<String> {
        let mut url = self.endpoint("reverse")?;
        url.query_pairs_mut()
            .append_pair("lat", &latitude.to_string())
            .append_pair("lon", &longitude.to_string())
            .append_pair("format", "json")
            .append_pair("zoom", "10");

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: ReverseResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        let name = body.display_name?;
        tracing::info!("Reverse geocoded to: {}", name);
        Some(name)
    }

    fn endpoint(&self, name: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut().ok()?.pop_if_empty().push(name);
        Some(url)
    }
}
