//! Async plumbing between the session and the network.
//!
//! Fetches run on the Tokio runtime; results come back to the owning thread
//! as messages over mpsc and are applied synchronously by
//! [`Dashboard::process_messages`]. Requests are fire-and-forget: a
//! superseded in-flight request is not cancelled, so a stale response can
//! arrive after a newer one and responses apply in arrival order.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use skycast_core::Config;
use skycast_weather::{
    ForecastResponse, GeocodeClient, Location, ProfileResponse, ThresholdSet, WeatherClient,
    WeatherError,
};

use crate::debounce::Debouncer;
use crate::map::{MapEvent, MapView};
use crate::session::Session;

/// Messages sent from async operations back to the owning thread.
#[derive(Debug)]
pub enum DashboardMessage {
    ProfileFetched {
        location: Location,
        date: NaiveDate,
        result: Result<ProfileResponse, WeatherError>,
    },
    ForecastFetched {
        location: Location,
        result: Result<ForecastResponse, WeatherError>,
    },
    SuggestionsReady(Vec<Location>),
}

/// Spawn a profile fetch; sends `ProfileFetched` when complete.
pub fn request_profile(
    tx: &Sender<DashboardMessage>,
    client: WeatherClient,
    location: Location,
    date: NaiveDate,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client
            .fetch_profile(location.latitude, location.longitude, date)
            .await;
        let _ = tx.send(DashboardMessage::ProfileFetched {
            location,
            date,
            result,
        });
    });
}

/// Spawn a forecast fetch; sends `ForecastFetched` when complete.
pub fn request_forecast(
    tx: &Sender<DashboardMessage>,
    client: WeatherClient,
    location: Location,
    thresholds: ThresholdSet,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let t = (!thresholds.is_empty()).then_some(thresholds);
        let result = client
            .fetch_forecast(location.latitude, location.longitude, t.as_ref())
            .await;
        let _ = tx.send(DashboardMessage::ForecastFetched { location, result });
    });
}

/// Spawn a geocoding search; sends `SuggestionsReady` when complete.
/// Geocoding failures surface as an empty suggestion list.
pub fn request_search(tx: &Sender<DashboardMessage>, geocoder: GeocodeClient, query: String) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let suggestions = geocoder.search(&query).await;
        let _ = tx.send(DashboardMessage::SuggestionsReady(suggestions));
    });
}

/// The dashboard controller: owns the session, the API clients, the event
/// debouncer and the message channel.
pub struct Dashboard {
    session: Session,
    client: WeatherClient,
    geocoder: Option<GeocodeClient>,
    debouncer: Debouncer,
    tx: Sender<DashboardMessage>,
    rx: Receiver<DashboardMessage>,
}

impl Dashboard {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = WeatherClient::new(&config.api.weather_base_url)
            .context("Failed to create weather client")?;
        let geocoder = GeocodeClient::with_base_url(&config.api.geocode_base_url);
        if geocoder.is_none() {
            tracing::warn!("Geocoding disabled: client could not be created");
        }

        let today = chrono::Utc::now().date_naive();
        let session = Session::new(
            Location::new(
                config.dashboard.default_latitude,
                config.dashboard.default_longitude,
            ),
            today,
            config.units,
            config.thresholds,
            config.policy,
            config.rules,
        );

        let (tx, rx) = std::sync::mpsc::channel();
        Ok(Self {
            session,
            client,
            geocoder,
            debouncer: Debouncer::new(Duration::from_millis(config.dashboard.debounce_ms)),
            tx,
            rx,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Immediate profile fetch for the current location and date.
    pub fn refresh(&self) {
        request_profile(
            &self.tx,
            self.client.clone(),
            self.session.location().clone(),
            self.session.date(),
        );
    }

    /// Immediate forecast fetch for the current location and thresholds.
    pub fn refresh_forecast(&self) {
        request_forecast(
            &self.tx,
            self.client.clone(),
            self.session.location().clone(),
            self.session.thresholds(),
        );
    }

    /// Map click or marker drag: move the marker right away, then fetch
    /// after the idle window so a burst of events becomes one request.
    pub fn handle_map_event(&mut self, event: MapEvent, map: &mut dyn MapView) {
        let (latitude, longitude) = event.coordinates();
        self.session.set_location(latitude, longitude);
        map.set_marker(latitude, longitude);

        let tx = self.tx.clone();
        let client = self.client.clone();
        let location = self.session.location().clone();
        let date = self.session.date();
        self.debouncer.arm(async move {
            let result = client
                .fetch_profile(location.latitude, location.longitude, date)
                .await;
            let _ = tx.send(DashboardMessage::ProfileFetched {
                location,
                date,
                result,
            });
        });
    }

    /// Free-text location search; suggestions arrive as a message.
    pub fn search(&self, query: &str) {
        match &self.geocoder {
            Some(geocoder) => request_search(&self.tx, geocoder.clone(), query.to_string()),
            None => {
                // Same behavior as a failed lookup: empty suggestions.
                let _ = self.tx.send(DashboardMessage::SuggestionsReady(Vec::new()));
            }
        }
    }

    /// Pick a search suggestion: recenter the map, move the marker and
    /// fetch for the new location.
    pub fn select_suggestion(&mut self, index: usize, map: &mut dyn MapView) -> bool {
        let Some(choice) = self.session.suggestions().get(index).cloned() else {
            return false;
        };
        map.center(choice.latitude, choice.longitude);
        map.set_marker(choice.latitude, choice.longitude);
        self.session.select_location(choice);
        self.refresh();
        true
    }

    /// Drain pending messages and apply them to the session. Returns the
    /// number of messages applied.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            match message {
                DashboardMessage::ProfileFetched {
                    location,
                    date,
                    result,
                } => self.session.apply_profile(location, date, result),
                DashboardMessage::ForecastFetched { location, result } => {
                    self.session.apply_forecast(location, result);
                }
                DashboardMessage::SuggestionsReady(suggestions) => {
                    self.session.apply_suggestions(suggestions);
                }
            }
            applied += 1;
        }
        applied
    }
}
