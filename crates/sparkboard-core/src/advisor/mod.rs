//! "What to wear": forecast lookup plus outfit rules.
//!
//! The flow is location, then forecast, then advice. A location failure
//! stops before any forecast request is made.

pub mod forecast;
pub mod location;
pub mod outfit;

use serde::Serialize;

pub use forecast::{Forecast, ForecastClient, ForecastSample, ForecastSource};
pub use location::{Coordinates, FixedLocation, LocationProvider};
pub use outfit::{advise, suggest, Activity, TempBand, CHOOSE_ACTIVITY};

use crate::error::UpstreamError;

/// What the advisor panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceReport {
    pub forecast: Option<Forecast>,
    /// Inline error line, when the forecast could not be loaded.
    pub error: Option<String>,
    pub advice: String,
}

pub struct OutfitAdvisor<L, F> {
    location: L,
    source: F,
}

impl<L: LocationProvider, F: ForecastSource> OutfitAdvisor<L, F> {
    pub fn new(location: L, source: F) -> Self {
        Self { location, source }
    }

    /// Load the forecast, or the message to show instead.
    pub async fn load_forecast(&self) -> Result<Forecast, String> {
        let coords = self.location.locate().map_err(|e| {
            tracing::warn!(error = %e, "location unavailable");
            e.to_string()
        })?;
        self.source
            .fetch(coords.latitude, coords.longitude)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "forecast request failed");
                forecast_error_message(&e)
            })
    }

    pub async fn report(&self, activity: Option<Activity>) -> AdviceReport {
        match self.load_forecast().await {
            Ok(forecast) => AdviceReport {
                advice: advise(Some(&forecast), activity),
                forecast: Some(forecast),
                error: None,
            },
            Err(error) => AdviceReport {
                forecast: None,
                error: Some(error),
                advice: advise(None, activity),
            },
        }
    }
}

/// "Error fetching forecast: ..." using the service's own wording when it
/// gave one.
pub fn forecast_error_message(err: &UpstreamError) -> String {
    let detail = match err {
        UpstreamError::Rejected { message, .. } => message.clone(),
        other => other.to_string(),
    };
    format!("Error fetching forecast: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingSource {
        calls: AtomicU32,
        result: fn() -> Result<Forecast, UpstreamError>,
    }

    #[async_trait]
    impl ForecastSource for CountingSource {
        async fn fetch(&self, _lat: f64, _lon: f64) -> Result<Forecast, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn sunny() -> Result<Forecast, UpstreamError> {
        Ok(Forecast {
            city: "Austin".into(),
            timeline: vec![ForecastSample {
                time: Utc::now(),
                temp: 80.0,
                condition: "Clear".into(),
            }],
        })
    }

    #[tokio::test]
    async fn location_failure_skips_forecast() {
        let source = CountingSource {
            calls: AtomicU32::new(0),
            result: sunny,
        };
        let advisor = OutfitAdvisor::new(FixedLocation::default(), source);
        let report = advisor.report(Some(Activity::School)).await;
        assert_eq!(report.error.as_deref(), Some("Location is not configured."));
        assert_eq!(report.advice, CHOOSE_ACTIVITY);
        assert_eq!(advisor.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forecast_feeds_advice() {
        let source = CountingSource {
            calls: AtomicU32::new(0),
            result: sunny,
        };
        let advisor = OutfitAdvisor::new(
            FixedLocation::new(Some(Coordinates::new(30.27, -97.74))),
            source,
        );
        let report = advisor.report(Some(Activity::Date)).await;
        assert!(report.error.is_none());
        assert!(report.advice.contains("Cute dress"));
        assert!(report.advice.starts_with("Currently 80°F (Clear) in Austin."));
    }

    #[tokio::test]
    async fn upstream_failure_is_reported_inline() {
        let source = CountingSource {
            calls: AtomicU32::new(0),
            result: || {
                Err(UpstreamError::Rejected {
                    service: "forecast",
                    message: "Invalid API key".into(),
                })
            },
        };
        let advisor = OutfitAdvisor::new(
            FixedLocation::new(Some(Coordinates::new(0.0, 0.0))),
            source,
        );
        let report = advisor.report(None).await;
        assert_eq!(
            report.error.as_deref(),
            Some("Error fetching forecast: Invalid API key")
        );
        assert!(report.forecast.is_none());
    }
}
