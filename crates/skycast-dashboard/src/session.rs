//! Dashboard session state.
//!
//! All entities here are request-scoped: a fetch cycle builds a complete
//! snapshot and replaces the previous one wholesale, never field-by-field.
//! The raw payload is retained inside the snapshot so a unit change can
//! re-derive the converted view from untouched source values instead of
//! chaining conversions.
//!
//! Failure policy: a failed fetch preserves the last-good snapshot and
//! surfaces the error in a separate slot.

use chrono::{DateTime, NaiveDate, Utc};

use skycast_core::AppError;
use skycast_weather::{
    analysis, export, gate_probabilities, suitability, AnalysisPolicy, AnalysisSummary,
    CurrentConditions, DayConditions, ForecastDay, ForecastResponse, Location, ProbabilityReading,
    ProfileResponse, RuleThresholds, ThresholdSet, UnitPreferences, Verdict, WeatherError,
    YearlyRecord,
};

/// Result of one profile fetch-and-analyze cycle.
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub location: Location,
    pub date: NaiveDate,
    /// Untouched API payload, kept for unit re-derivation.
    raw: ProfileResponse,
    /// Converted copy; everything downstream reads this.
    pub records: Vec<YearlyRecord>,
    pub summary: AnalysisSummary,
    pub verdicts: Vec<Verdict>,
    pub fetched_at: DateTime<Utc>,
}

/// Result of one forecast fetch cycle.
#[derive(Debug, Clone)]
pub struct ForecastSnapshot {
    pub location: Location,
    raw: ForecastResponse,
    pub current: Option<CurrentConditions>,
    pub days: Vec<ForecastDay>,
    pub day_verdicts: Vec<Verdict>,
    pub probabilities: Vec<ProbabilityReading>,
    pub fetched_at: DateTime<Utc>,
}

/// The dashboard's mutable state: current selection, preferences and the
/// latest analysis snapshots.
#[derive(Debug)]
pub struct Session {
    location: Location,
    date: NaiveDate,
    units: UnitPreferences,
    thresholds: ThresholdSet,
    policy: AnalysisPolicy,
    rules: RuleThresholds,
    profile: Option<ProfileSnapshot>,
    forecast: Option<ForecastSnapshot>,
    error: Option<AppError>,
    suggestions: Vec<Location>,
}

impl Session {
    pub fn new(
        location: Location,
        date: NaiveDate,
        units: UnitPreferences,
        thresholds: ThresholdSet,
        policy: AnalysisPolicy,
        rules: RuleThresholds,
    ) -> Self {
        Self {
            location,
            date,
            units,
            thresholds,
            policy,
            rules,
            profile: None,
            forecast: None,
            error: None,
            suggestions: Vec::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn units(&self) -> UnitPreferences {
        self.units
    }

    pub fn thresholds(&self) -> ThresholdSet {
        self.thresholds
    }

    pub fn profile(&self) -> Option<&ProfileSnapshot> {
        self.profile.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastSnapshot> {
        self.forecast.as_ref()
    }

    /// Full error for the visible slot; `Display` carries the raw detail
    /// (for an API failure, the `<status> <statusText> <body>` string).
    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    /// User-friendly rendering of the current error.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(AppError::user_message)
    }

    pub fn suggestions(&self) -> &[Location] {
        &self.suggestions
    }

    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        self.location = Location::new(latitude, longitude);
    }

    pub fn select_location(&mut self, location: Location) {
        self.location = location;
        self.suggestions.clear();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_thresholds(&mut self, thresholds: ThresholdSet) {
        self.thresholds = thresholds;
    }

    /// Change display units and re-derive every converted view from the
    /// retained raw payloads. No network traffic; the output depends only
    /// on (raw payload, new units, thresholds).
    pub fn set_units(&mut self, units: UnitPreferences) {
        if self.units == units {
            return;
        }
        self.units = units;
        if let Some(snapshot) = self.profile.take() {
            self.profile = Some(self.build_profile(
                snapshot.location,
                snapshot.date,
                snapshot.raw,
                snapshot.fetched_at,
            ));
        }
        if let Some(snapshot) = self.forecast.take() {
            self.forecast =
                Some(self.build_forecast(snapshot.location, snapshot.raw, snapshot.fetched_at));
        }
    }

    /// Apply the outcome of a profile fetch. Success replaces the snapshot
    /// wholesale and clears the error slot; failure keeps the last-good
    /// snapshot and records the error message.
    pub fn apply_profile(
        &mut self,
        location: Location,
        date: NaiveDate,
        result: Result<ProfileResponse, WeatherError>,
    ) {
        match result {
            Ok(raw) => {
                self.profile = Some(self.build_profile(location, date, raw, Utc::now()));
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Profile fetch failed: {}", e);
                self.error = Some(AppError::from(e));
            }
        }
    }

    /// Apply the outcome of a forecast fetch; same failure policy as
    /// [`Session::apply_profile`].
    pub fn apply_forecast(
        &mut self,
        location: Location,
        result: Result<ForecastResponse, WeatherError>,
    ) {
        match result {
            Ok(raw) => {
                self.forecast = Some(self.build_forecast(location, raw, Utc::now()));
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Forecast fetch failed: {}", e);
                self.error = Some(AppError::from(e));
            }
        }
    }

    pub fn apply_suggestions(&mut self, suggestions: Vec<Location>) {
        self.suggestions = suggestions;
    }

    /// CSV of the converted profile records; `None` before the first
    /// successful fetch.
    pub fn export_csv(&self) -> Option<String> {
        let snapshot = self.profile.as_ref()?;
        Some(export::csv_document(&snapshot.records, self.units))
    }

    pub fn export_filename(&self) -> String {
        export::csv_filename(self.location.latitude, self.location.longitude)
    }

    fn build_profile(
        &self,
        location: Location,
        date: NaiveDate,
        raw: ProfileResponse,
        fetched_at: DateTime<Utc>,
    ) -> ProfileSnapshot {
        let records = analysis::convert_records(&raw.raw_data, self.units);
        let air_quality = raw
            .data_analysis
            .as_ref()
            .and_then(|a| a.avg_air_quality.clone());
        let summary = analysis::analyze(&records, self.units, &self.policy, air_quality);
        let verdicts = suitability::evaluate_summary(&summary, &self.rules);

        ProfileSnapshot {
            location,
            date,
            raw,
            records,
            summary,
            verdicts,
            fetched_at,
        }
    }

    fn build_forecast(
        &self,
        location: Location,
        raw: ForecastResponse,
        fetched_at: DateTime<Utc>,
    ) -> ForecastSnapshot {
        let current = raw
            .current
            .as_ref()
            .map(|c| analysis::convert_current(c, self.units));
        let days: Vec<ForecastDay> = raw
            .forecast
            .iter()
            .map(|d| analysis::convert_day(d, self.units))
            .collect();

        // Today's record drives the day-level verdicts; fall back to the
        // first forecast day when the payload has no current block.
        let today: Option<DayConditions> = current
            .as_ref()
            .map(DayConditions::from)
            .or_else(|| days.first().map(DayConditions::from));
        let day_verdicts = today
            .map(|t| suitability::evaluate_day(t, self.units, &self.rules))
            .unwrap_or_default();

        let probabilities = gate_probabilities(&self.thresholds, raw.probabilities.as_ref());

        ForecastSnapshot {
            location,
            raw,
            current,
            days,
            day_verdicts,
            probabilities,
            fetched_at,
        }
    }
}
