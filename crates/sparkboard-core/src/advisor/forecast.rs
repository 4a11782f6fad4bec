//! Weather forecast client (OpenWeatherMap 5 day / 3 hour endpoint).
//!
//! Only the fields the advisor uses are decoded. The service reports errors
//! in-band through `cod`, so the body is decoded before the HTTP status is
//! considered.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, CoreError, UpstreamError};
use crate::storage::{credentials, ForecastConfig};

const SERVICE: &str = "forecast";

/// One 3-hour interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    /// °F with imperial units.
    pub temp: f64,
    /// Coarse label such as `Clear`, `Clouds`, `Rain` or `Snow`.
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub timeline: Vec<ForecastSample>,
}

/// Source of forecasts for a position.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Forecast, UpstreamError>;
}

// Wire shapes.

#[derive(Debug, Deserialize)]
struct OwmResponse {
    cod: serde_json::Value,
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    city: Option<OwmCity>,
    #[serde(default)]
    list: Option<Vec<OwmEntry>>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmEntry {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
}

fn malformed(message: impl Into<String>) -> UpstreamError {
    UpstreamError::Malformed {
        service: SERVICE,
        message: message.into(),
    }
}

/// Decode a forecast body, keeping the first `samples` intervals.
pub fn decode(body: &str, samples: usize) -> Result<Forecast, UpstreamError> {
    let raw: OwmResponse = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    let ok = raw.cod.as_str() == Some("200") || raw.cod.as_u64() == Some(200);
    if !ok {
        let message = match raw.message {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => format!("code {}", raw.cod),
        };
        return Err(UpstreamError::Rejected {
            service: SERVICE,
            message,
        });
    }

    let city = raw.city.ok_or_else(|| malformed("missing city"))?.name;
    let list = raw.list.ok_or_else(|| malformed("missing list"))?;
    let timeline = list
        .into_iter()
        .take(samples)
        .map(|entry| {
            let time = DateTime::<Utc>::from_timestamp(entry.dt, 0)
                .ok_or_else(|| malformed(format!("timestamp {} out of range", entry.dt)))?;
            let condition = entry
                .weather
                .into_iter()
                .next()
                .map(|w| w.main)
                .ok_or_else(|| malformed("entry without weather"))?;
            Ok(ForecastSample {
                time,
                temp: entry.main.temp,
                condition,
            })
        })
        .collect::<Result<Vec<_>, UpstreamError>>()?;

    if timeline.is_empty() {
        return Err(malformed("empty forecast list"));
    }
    Ok(Forecast { city, timeline })
}

/// HTTP client for the forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: Url,
    units: String,
    samples: usize,
    api_key: Option<String>,
}

impl ForecastClient {
    pub fn new(config: &ForecastConfig, api_key: Option<String>) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "forecast.base_url".to_string(),
            message: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport {
                service: SERVICE,
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url,
            units: config.units.clone(),
            samples: config.samples.max(1),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Client using the key from the environment or the OS keyring.
    pub fn from_config(config: &ForecastConfig) -> Result<Self, CoreError> {
        Self::new(config, credentials::forecast_api_key())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Forecast, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| UpstreamError::NotConfigured {
            service: SERVICE,
            message: "no API key; run `sparkboard auth set-forecast-key`".to_string(),
        })?;

        tracing::debug!(latitude, longitude, "fetching forecast");
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("units", self.units.clone()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| UpstreamError::Transport {
            service: SERVICE,
            message: e.to_string(),
        })?;

        match decode(&body, self.samples) {
            Err(UpstreamError::Malformed { .. }) if !status.is_success() => {
                Err(UpstreamError::Status {
                    service: SERVICE,
                    status: status.as_u16(),
                })
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "cod": "200",
        "city": {"name": "Nashville"},
        "list": [
            {"dt": 1700000000, "main": {"temp": 41.2}, "weather": [{"main": "Rain"}]},
            {"dt": 1700010800, "main": {"temp": 44.0}, "weather": [{"main": "Clouds"}]},
            {"dt": 1700021600, "main": {"temp": 47.5}, "weather": [{"main": "Clear"}]}
        ]
    }"#;

    #[test]
    fn decodes_and_truncates() {
        let f = decode(BODY, 2).unwrap();
        assert_eq!(f.city, "Nashville");
        assert_eq!(f.timeline.len(), 2);
        assert_eq!(f.timeline[0].time.timestamp(), 1_700_000_000);
        assert_eq!(f.timeline[0].condition, "Rain");
        assert_eq!(f.timeline[1].temp, 44.0);
    }

    #[test]
    fn in_band_error_is_rejected_with_message() {
        let err = decode(r#"{"cod":"404","message":"city not found"}"#, 8).unwrap_err();
        match err {
            UpstreamError::Rejected { message, .. } => assert_eq!(message, "city not found"),
            other => panic!("unexpected {other:?}"),
        }
        let err = decode(r#"{"cod":401,"message":"Invalid API key"}"#, 8).unwrap_err();
        assert!(matches!(err, UpstreamError::Rejected { .. }));
    }

    #[test]
    fn shape_mismatch_is_malformed() {
        assert!(matches!(
            decode(r#"{"cod":"200","city":{"name":"X"}}"#, 8),
            Err(UpstreamError::Malformed { .. })
        ));
        assert!(matches!(
            decode(r#"{"cod":"200","city":{"name":"X"},"list":[{"dt":1,"main":{"temp":1},"weather":[]}]}"#, 8),
            Err(UpstreamError::Malformed { .. })
        ));
        assert!(matches!(decode("<html>", 8), Err(UpstreamError::Malformed { .. })));
    }

    #[tokio::test]
    async fn missing_key_never_calls_out() {
        let client = ForecastClient::new(&ForecastConfig::default(), None).unwrap();
        assert!(!client.has_api_key());
        let err = client.fetch(1.0, 2.0).await.unwrap_err();
        assert!(matches!(err, UpstreamError::NotConfigured { .. }));
    }
}
