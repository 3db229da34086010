//! Rule-based activity suitability.
//!
//! A fixed, ordered list of activities is judged either against the
//! aggregate summary (profile mode) or against a single day's conditions
//! (forecast mode). Predicates are evaluated independently per activity.
//! When an activity is unsuitable exactly one reason is attached, chosen by
//! fixed precedence: rain first, then wind, then temperature.
//!
//! All rule constants are held in native units (Celsius, m/s, mm) and
//! converted to the active display unit at comparison time, so the verdicts
//! are identical whichever units the user is looking at.

use serde::{Deserialize, Serialize};

use crate::analysis::{format_one_decimal, AnalysisSummary};
use crate::types::{CurrentConditions, ForecastDay, UnitPreferences};
use crate::units::{convert_temperature, convert_wind};

/// The fixed activity list, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Hiking,
    Beach,
    Cycling,
    OutdoorEvent,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::Hiking,
        Activity::Beach,
        Activity::Cycling,
        Activity::OutdoorEvent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hiking => "Hiking",
            Self::Beach => "Beach",
            Self::Cycling => "Cycling",
            Self::OutdoorEvent => "Outdoor Event",
        }
    }
}

/// Fitness judgment for one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub activity: Activity,
    pub suitable: bool,
    pub reason: Option<String>,
}

/// Rule constants, native units. All of them are config-overridable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuleThresholds {
    // Aggregate (profile) rules
    pub hiking_rain_pct: u8,
    pub hiking_wind_mps: f64,
    pub hiking_heat_celsius: f64,
    pub hiking_cold_celsius: f64,
    pub beach_rain_pct: u8,
    pub beach_cool_celsius: f64,
    pub cycling_wind_mps: f64,
    pub cycling_rain_pct: u8,
    pub event_rain_pct: u8,

    // Single-day (forecast) rules
    pub day_hiking_precip_mm: f64,
    pub day_hiking_wind_mps: f64,
    pub day_beach_precip_mm: f64,
    pub day_cycling_precip_mm: f64,
    pub day_cycling_wind_mps: f64,
    pub day_event_precip_mm: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            hiking_rain_pct: 40,
            hiking_wind_mps: 10.0,
            hiking_heat_celsius: 40.0,
            hiking_cold_celsius: 0.0,
            beach_rain_pct: 30,
            beach_cool_celsius: 20.0,
            cycling_wind_mps: 12.5,
            cycling_rain_pct: 40,
            event_rain_pct: 35,

            day_hiking_precip_mm: 2.0,
            day_hiking_wind_mps: 8.0,
            day_beach_precip_mm: 1.0,
            day_cycling_precip_mm: 2.0,
            day_cycling_wind_mps: 12.0,
            day_event_precip_mm: 3.0,
        }
    }
}

/// Evaluate the aggregate rules against a summary.
///
/// An entirely-absent summary produces no verdicts; the evaluator never
/// fabricates a default answer.
pub fn evaluate_summary(summary: &AnalysisSummary, rules: &RuleThresholds) -> Vec<Verdict> {
    if summary.is_empty() {
        return Vec::new();
    }

    let prefs = summary.units;
    let avg_temp = summary.avg_max_temp;
    let chance_rain = summary.pct_rain.unwrap_or(0);
    let avg_wind = summary.avg_wind;

    let temp_display = |t: Option<f64>| {
        format!(
            "{}°{}",
            format_one_decimal(t),
            prefs.temperature.label()
        )
    };
    let wind_display =
        |w: f64| format!("{} {}", format_one_decimal(Some(w)), prefs.wind.label());

    let mut verdicts = Vec::with_capacity(Activity::ALL.len());
    for activity in Activity::ALL {
        let verdict = match activity {
            Activity::Hiking => {
                let windy = avg_wind
                    .is_some_and(|w| w >= convert_wind(rules.hiking_wind_mps, prefs.wind));
                let too_hot = avg_temp.is_some_and(|t| {
                    t >= convert_temperature(rules.hiking_heat_celsius, prefs.temperature)
                });
                let too_cold = avg_temp.is_some_and(|t| {
                    t <= convert_temperature(rules.hiking_cold_celsius, prefs.temperature)
                });
                if chance_rain >= rules.hiking_rain_pct {
                    unsuitable(activity, format!("High chance of rain ({chance_rain}%)"))
                } else if windy {
                    unsuitable(activity, format!("Windy ({})", wind_display(avg_wind.unwrap_or(0.0))))
                } else if too_hot || too_cold {
                    unsuitable(
                        activity,
                        format!("Temperature outside comfortable range ({})", temp_display(avg_temp)),
                    )
                } else {
                    suitable(activity)
                }
            }
            Activity::Beach => {
                let too_cool = avg_temp.is_some_and(|t| {
                    t < convert_temperature(rules.beach_cool_celsius, prefs.temperature)
                });
                if chance_rain >= rules.beach_rain_pct {
                    unsuitable(activity, format!("Rain likely ({chance_rain}%)"))
                } else if too_cool {
                    unsuitable(activity, format!("Too cool ({})", temp_display(avg_temp)))
                } else {
                    suitable(activity)
                }
            }
            Activity::Cycling => {
                let very_windy = avg_wind
                    .is_some_and(|w| w >= convert_wind(rules.cycling_wind_mps, prefs.wind));
                if chance_rain >= rules.cycling_rain_pct {
                    unsuitable(activity, format!("Rain likely ({chance_rain}%)"))
                } else if very_windy {
                    unsuitable(
                        activity,
                        format!("Very windy ({})", wind_display(avg_wind.unwrap_or(0.0))),
                    )
                } else {
                    suitable(activity)
                }
            }
            Activity::OutdoorEvent => {
                if chance_rain >= rules.event_rain_pct {
                    unsuitable(activity, format!("Rain likely ({chance_rain}%)"))
                } else {
                    suitable(activity)
                }
            }
        };
        verdicts.push(verdict);
    }
    verdicts
}

/// Day-level conditions in display units, used by the forecast-mode rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayConditions {
    pub max_temp: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl From<&ForecastDay> for DayConditions {
    fn from(day: &ForecastDay) -> Self {
        Self {
            max_temp: day.max_temp,
            precipitation: day.precipitation,
            wind_speed: day.wind_speed,
        }
    }
}

impl From<&CurrentConditions> for DayConditions {
    fn from(current: &CurrentConditions) -> Self {
        Self {
            max_temp: current.max_temp.or(current.temperature),
            precipitation: current.precipitation,
            wind_speed: current.wind_speed,
        }
    }
}

impl DayConditions {
    fn is_empty(&self) -> bool {
        self.max_temp.is_none() && self.precipitation.is_none() && self.wind_speed.is_none()
    }
}

/// Evaluate the single-day rules against one day's converted conditions.
pub fn evaluate_day(
    day: DayConditions,
    prefs: UnitPreferences,
    rules: &RuleThresholds,
) -> Vec<Verdict> {
    if day.is_empty() {
        return Vec::new();
    }

    let precip = day.precipitation;
    let wind = day.wind_speed;
    let temp = day.max_temp;

    let temp_display =
        |t: Option<f64>| format!("{}°{}", format_one_decimal(t), prefs.temperature.label());
    let wind_display =
        |w: Option<f64>| format!("{} {}", format_one_decimal(w), prefs.wind.label());
    let precip_display = |p: Option<f64>| format!("{} mm", format_one_decimal(p));

    let mut verdicts = Vec::with_capacity(Activity::ALL.len());
    for activity in Activity::ALL {
        let verdict = match activity {
            Activity::Hiking => {
                let rainy = precip.is_some_and(|p| p > rules.day_hiking_precip_mm);
                let windy =
                    wind.is_some_and(|w| w > convert_wind(rules.day_hiking_wind_mps, prefs.wind));
                let too_hot = temp.is_some_and(|t| {
                    t > convert_temperature(rules.hiking_heat_celsius, prefs.temperature)
                });
                if rainy {
                    unsuitable(activity, format!("Rain expected ({})", precip_display(precip)))
                } else if windy {
                    unsuitable(activity, format!("Windy ({})", wind_display(wind)))
                } else if too_hot {
                    unsuitable(activity, format!("Too hot ({})", temp_display(temp)))
                } else {
                    suitable(activity)
                }
            }
            Activity::Beach => {
                let rainy = precip.is_some_and(|p| p > rules.day_beach_precip_mm);
                let too_cool = temp.is_some_and(|t| {
                    t < convert_temperature(rules.beach_cool_celsius, prefs.temperature)
                });
                if rainy {
                    unsuitable(activity, format!("Rain expected ({})", precip_display(precip)))
                } else if too_cool {
                    unsuitable(activity, format!("Too cool ({})", temp_display(temp)))
                } else {
                    suitable(activity)
                }
            }
            Activity::Cycling => {
                let rainy = precip.is_some_and(|p| p > rules.day_cycling_precip_mm);
                let windy =
                    wind.is_some_and(|w| w > convert_wind(rules.day_cycling_wind_mps, prefs.wind));
                if rainy {
                    unsuitable(activity, format!("Rain expected ({})", precip_display(precip)))
                } else if windy {
                    unsuitable(activity, format!("Very windy ({})", wind_display(wind)))
                } else {
                    suitable(activity)
                }
            }
            Activity::OutdoorEvent => {
                if precip.is_some_and(|p| p > rules.day_event_precip_mm) {
                    unsuitable(activity, format!("Rain expected ({})", precip_display(precip)))
                } else {
                    suitable(activity)
                }
            }
        };
        verdicts.push(verdict);
    }
    verdicts
}

fn suitable(activity: Activity) -> Verdict {
    Verdict {
        activity,
        suitable: true,
        reason: None,
    }
}

fn unsuitable(activity: Activity, reason: String) -> Verdict {
    Verdict {
        activity,
        suitable: false,
        reason: Some(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TemperatureUnit, WindUnit};

    fn summary(
        avg_temp: Option<f64>,
        pct_rain: Option<u8>,
        avg_wind: Option<f64>,
        prefs: UnitPreferences,
    ) -> AnalysisSummary {
        AnalysisSummary {
            avg_max_temp: avg_temp,
            pct_rain,
            pct_extreme_heat: Some(0),
            avg_wind,
            air_quality: None,
            units: prefs,
        }
    }

    #[test]
    fn hiking_suitable_at_36_degrees() {
        // 36 < 40, 10% rain, 5 m/s wind: all clear.
        let s = summary(Some(36.0), Some(10), Some(5.0), UnitPreferences::default());
        let verdicts = evaluate_summary(&s, &RuleThresholds::default());
        let hiking = &verdicts[0];
        assert_eq!(hiking.activity, Activity::Hiking);
        assert!(hiking.suitable);
        assert!(hiking.reason.is_none());
    }

    #[test]
    fn hiking_unsuitable_by_heat_at_41_degrees() {
        let s = summary(Some(41.0), Some(10), Some(5.0), UnitPreferences::default());
        let verdicts = evaluate_summary(&s, &RuleThresholds::default());
        let hiking = &verdicts[0];
        assert!(!hiking.suitable);
        let reason = hiking.reason.as_deref().unwrap();
        assert!(reason.contains("Temperature"), "got: {reason}");
        assert!(reason.contains("41.0"), "got: {reason}");
    }

    #[test]
    fn rain_precedence_over_wind_and_temperature() {
        // 45% rain trips Hiking, Cycling and Outdoor Event, all citing rain
        // even though wind and temperature are also extreme.
        let s = summary(Some(45.0), Some(45), Some(20.0), UnitPreferences::default());
        let verdicts = evaluate_summary(&s, &RuleThresholds::default());

        for activity in [Activity::Hiking, Activity::Cycling, Activity::OutdoorEvent] {
            let v = verdicts.iter().find(|v| v.activity == activity).unwrap();
            assert!(!v.suitable, "{} should be unsuitable", activity.name());
            let reason = v.reason.as_deref().unwrap().to_lowercase();
            assert!(reason.contains("rain"), "{}: {reason}", activity.name());
        }
    }

    #[test]
    fn verdict_order_is_fixed() {
        let s = summary(Some(25.0), Some(0), Some(1.0), UnitPreferences::default());
        let verdicts = evaluate_summary(&s, &RuleThresholds::default());
        let order: Vec<Activity> = verdicts.iter().map(|v| v.activity).collect();
        assert_eq!(order, Activity::ALL.to_vec());
    }

    #[test]
    fn constants_convert_with_display_units() {
        // 37 km/h >= the 36 km/h hiking limit (10 m/s converted).
        let prefs = UnitPreferences {
            temperature: TemperatureUnit::Celsius,
            wind: WindUnit::KilometersPerHour,
        };
        let s = summary(Some(25.0), Some(0), Some(37.0), prefs);
        let verdicts = evaluate_summary(&s, &RuleThresholds::default());
        let hiking = &verdicts[0];
        assert!(!hiking.suitable);
        assert!(hiking.reason.as_deref().unwrap().contains("km/h"));
    }

    #[test]
    fn fahrenheit_beach_cutoff() {
        // 65 F < 68 F (20 C): too cool for the beach.
        let prefs = UnitPreferences {
            temperature: TemperatureUnit::Fahrenheit,
            wind: WindUnit::MetersPerSecond,
        };
        let s = summary(Some(65.0), Some(0), Some(2.0), prefs);
        let verdicts = evaluate_summary(&s, &RuleThresholds::default());
        let beach = verdicts.iter().find(|v| v.activity == Activity::Beach).unwrap();
        assert!(!beach.suitable);
        assert!(beach.reason.as_deref().unwrap().contains("Too cool"));
    }

    #[test]
    fn empty_summary_yields_no_verdicts() {
        let verdicts = evaluate_summary(&AnalysisSummary::default(), &RuleThresholds::default());
        assert!(verdicts.is_empty());
    }

    #[test]
    fn missing_wind_never_trips_wind_rules() {
        let s = summary(Some(25.0), Some(0), None, UnitPreferences::default());
        let verdicts = evaluate_summary(&s, &RuleThresholds::default());
        assert!(verdicts.iter().all(|v| v.suitable));
    }

    #[test]
    fn day_rules_trip_on_precipitation() {
        let day = DayConditions {
            max_temp: Some(25.0),
            precipitation: Some(2.5),
            wind_speed: Some(3.0),
        };
        let verdicts = evaluate_day(day, UnitPreferences::default(), &RuleThresholds::default());
        let hiking = &verdicts[0];
        assert!(!hiking.suitable);
        assert!(hiking.reason.as_deref().unwrap().contains("Rain expected"));

        // 2.5 mm is under the 3 mm event cutoff.
        let event = verdicts
            .iter()
            .find(|v| v.activity == Activity::OutdoorEvent)
            .unwrap();
        assert!(event.suitable);
    }

    #[test]
    fn day_rules_on_empty_conditions_yield_nothing() {
        let verdicts = evaluate_day(
            DayConditions::default(),
            UnitPreferences::default(),
            &RuleThresholds::default(),
        );
        assert!(verdicts.is_empty());
    }

    #[test]
    fn day_cycling_wind_cutoff() {
        let day = DayConditions {
            max_temp: Some(22.0),
            precipitation: Some(0.0),
            wind_speed: Some(12.5),
        };
        let verdicts = evaluate_day(day, UnitPreferences::default(), &RuleThresholds::default());
        let cycling = verdicts.iter().find(|v| v.activity == Activity::Cycling).unwrap();
        assert!(!cycling.suitable);
        let hiking = &verdicts[0];
        assert!(!hiking.suitable, "12.5 m/s also exceeds the 8 m/s hiking limit");
    }
}
