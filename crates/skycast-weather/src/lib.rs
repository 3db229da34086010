//! Weather domain crate for Skycast
//!
//! Data model for the historical-profile and forecast API payloads, plus the
//! pure analysis pipeline: unit conversion, statistical aggregation,
//! suitability rules, probability gating and CSV export.

pub mod analysis;
pub mod client;
pub mod export;
pub mod geocode;
pub mod probability;
pub mod suitability;
pub mod types;
pub mod units;

pub use analysis::{
    analyze, convert_current, convert_day, convert_records, AnalysisPolicy, AnalysisSummary,
};
pub use client::{ExportFormat, WeatherClient};
pub use geocode::GeocodeClient;
pub use probability::{gate_probabilities, ProbabilityReading, ThresholdVariable};
pub use suitability::{
    evaluate_day, evaluate_summary, Activity, DayConditions, RuleThresholds, Verdict,
};
pub use types::*;
