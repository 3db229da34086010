//! Client-composed CSV export of the converted record set.

use crate::types::{UnitPreferences, YearlyRecord};

/// Compose the CSV document: one header row, then one row per record in
/// input order. Absent fields are written as the literal `N/A`.
pub fn csv_document(records: &[YearlyRecord], prefs: UnitPreferences) -> String {
    let header = format!(
        "Year,Max_Temp_{},Precip_mm,Wind_{}",
        prefs.temperature.label(),
        prefs.wind.label()
    );

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header);
    for r in records {
        lines.push(format!(
            "{},{},{},{}",
            r.year,
            csv_field(r.max_temp),
            csv_field(r.precipitation),
            csv_field(r.wind_speed),
        ));
    }
    lines.join("\n")
}

/// Suggested filename for a download, keyed by coordinates.
pub fn csv_filename(latitude: f64, longitude: f64) -> String {
    format!("weather_{latitude}_{longitude}.csv")
}

fn csv_field(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TemperatureUnit, WindUnit};

    fn record(year: i32, max_temp: Option<f64>, precip: Option<f64>, wind: Option<f64>) -> YearlyRecord {
        YearlyRecord {
            year,
            max_temp,
            precipitation: precip,
            wind_speed: wind,
            air_quality: None,
        }
    }

    #[test]
    fn header_reflects_units() {
        let prefs = UnitPreferences {
            temperature: TemperatureUnit::Fahrenheit,
            wind: WindUnit::KilometersPerHour,
        };
        let csv = csv_document(&[], prefs);
        assert_eq!(csv, "Year,Max_Temp_F,Precip_mm,Wind_km/h");
    }

    #[test]
    fn rows_in_input_order_with_na_markers() {
        let records = vec![
            record(2021, Some(31.5), Some(0.0), None),
            record(2019, None, Some(2.4), Some(3.6)),
        ];
        let csv = csv_document(&records, UnitPreferences::default());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Year,Max_Temp_C,Precip_mm,Wind_m/s");
        assert_eq!(lines[1], "2021,31.5,0,N/A");
        assert_eq!(lines[2], "2019,N/A,2.4,3.6");
    }

    #[test]
    fn header_appears_exactly_once() {
        let records = vec![record(2020, Some(20.0), Some(1.0), Some(2.0))];
        let csv = csv_document(&records, UnitPreferences::default());
        assert_eq!(csv.matches("Year,").count(), 1);
    }

    #[test]
    fn filename_keyed_by_coordinates() {
        assert_eq!(csv_filename(2.3073, 112.9335), "weather_2.3073_112.9335.csv");
    }
}
