//! Display gating for server-computed exceedance probabilities.
//!
//! No probability is computed client-side. A metric is shown iff the user
//! explicitly set a threshold for it AND the server returned a value for it.

use serde::{Deserialize, Serialize};

use crate::types::{ExceedanceProbabilities, ThresholdSet};

/// Variable a threshold/probability pair refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdVariable {
    Temperature,
    Precipitation,
    WindSpeed,
}

impl ThresholdVariable {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Precipitation => "Precipitation",
            Self::WindSpeed => "Wind speed",
        }
    }
}

/// One displayable probability line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityReading {
    pub variable: ThresholdVariable,
    /// Threshold the user asked about, in current display units.
    pub threshold: f64,
    /// Server-computed chance of exceeding it, percent.
    pub probability: f64,
}

/// Filter the server probabilities down to the ones the user asked for.
pub fn gate_probabilities(
    thresholds: &ThresholdSet,
    probabilities: Option<&ExceedanceProbabilities>,
) -> Vec<ProbabilityReading> {
    let Some(probs) = probabilities else {
        return Vec::new();
    };

    let pairs = [
        (
            ThresholdVariable::Temperature,
            thresholds.temperature,
            probs.temperature_above,
        ),
        (
            ThresholdVariable::Precipitation,
            thresholds.precipitation,
            probs.precipitation_above,
        ),
        (
            ThresholdVariable::WindSpeed,
            thresholds.wind_speed,
            probs.windspeed_above,
        ),
    ];

    pairs
        .into_iter()
        .filter_map(|(variable, threshold, probability)| {
            Some(ProbabilityReading {
                variable,
                threshold: threshold?,
                probability: probability?,
            })
        })
        .collect()
}
