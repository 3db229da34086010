//! Integration tests for WeatherClient against a mock backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_weather::{ExportFormat, ThresholdSet, WeatherClient, WeatherError};

fn profile_body() -> serde_json::Value {
    json!({
        "rawData": [
            { "year": 2019, "max_temp": 31.0, "precipitation": 0.2, "wind_speed": 4.0, "air_quality": "Good" },
            { "year": 2020, "max_temp": 33.5, "precipitation": 1.8, "wind_speed": 5.5, "air_quality": "Moderate" }
        ],
        "dataAnalysis": { "avgAirQuality": "Good" }
    })
}

#[tokio::test]
async fn fetch_profile_parses_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "2.3073"))
        .and(query_param("lon", "112.9335"))
        .and(query_param("date", "2026-08-30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&server)
        .await;

    let client = WeatherClient::new(&server.uri()).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
    let profile = client.fetch_profile(2.3073, 112.9335, date).await.unwrap();

    assert_eq!(profile.raw_data.len(), 2);
    assert_eq!(profile.raw_data[0].year, 2019);
    assert_eq!(
        profile.data_analysis.unwrap().avg_air_quality.as_deref(),
        Some("Good")
    );
}

#[tokio::test]
async fn non_2xx_folds_status_and_body_into_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream data source down"))
        .mount(&server)
        .await;

    let client = WeatherClient::new(&server.uri()).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
    let err = client.fetch_profile(1.0, 2.0, date).await.unwrap_err();

    match &err {
        WeatherError::Api { status, status_text, body } => {
            assert_eq!(*status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "upstream data source down");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "500 Internal Server Error upstream data source down");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = WeatherClient::new(&server.uri()).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
    let err = client.fetch_profile(1.0, 2.0, date).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn fetch_forecast_sends_thresholds_as_json_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param(
            "thresholds",
            r#"{"temperature":30.0,"windSpeed":8.0}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": { "temperature": 27.0, "max_temp": 29.0, "precipitation": 0.0, "wind_speed": 3.0, "humidity": "55%" },
            "forecast": [
                { "date": "2026-08-31", "max_temp": 30.0, "precipitation": 0.4, "wind_speed": 4.2 }
            ],
            "probabilities": { "temperature_above": 41.0, "windspeed_above": 12.0 }
        })))
        .mount(&server)
        .await;

    let thresholds = ThresholdSet {
        temperature: Some(30.0),
        precipitation: None,
        wind_speed: Some(8.0),
    };
    let client = WeatherClient::new(&server.uri()).unwrap();
    let forecast = client
        .fetch_forecast(2.3073, 112.9335, Some(&thresholds))
        .await
        .unwrap();

    assert_eq!(forecast.forecast.len(), 1);
    let current = forecast.current.unwrap();
    assert_eq!(current.humidity, Some(55.0));
    let probs = forecast.probabilities.unwrap();
    assert_eq!(probs.temperature_above, Some(41.0));
    assert_eq!(probs.precipitation_above, None);
}

#[tokio::test]
async fn empty_thresholds_are_omitted_from_query() {
    let server = MockServer::start().await;
    // Matcher would reject a request carrying a thresholds param.
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "1"))
        .and(query_param("lon", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "forecast": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherClient::new(&server.uri()).unwrap();
    let forecast = client
        .fetch_forecast(1.0, 2.0, Some(&ThresholdSet::default()))
        .await
        .unwrap();
    assert!(forecast.forecast.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or("").contains("thresholds"));
}

#[tokio::test]
async fn download_export_returns_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .and(query_param("format", "csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Year,Max_Temp_C\n2020,31.0"))
        .mount(&server)
        .await;

    let client = WeatherClient::new(&server.uri()).unwrap();
    let body = client.download_export(1.0, 2.0, ExportFormat::Csv).await.unwrap();
    assert!(body.starts_with("Year,"));
}
