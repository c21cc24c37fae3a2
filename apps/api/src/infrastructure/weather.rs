//! Forecast lookups against WeatherAPI.com.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Days ahead beyond which the long-range `future.json` endpoint is used
pub const FORECAST_HORIZON_DAYS: i64 = 14;
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected weather response: {0}")]
    InvalidResponse(String),
}

/// Decides whether the weather suits playing a match
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// True when no rain is expected in `city` on the day of `date`
    async fn is_weather_good(&self, city: &str, date: DateTime<Utc>) -> Result<bool, WeatherError>;
}

/// Which upstream lookup a match date calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastWindow {
    /// The match already started; nothing to check
    Past,
    /// Within the forecast horizon; request this many days of forecast
    Forecast { days: i64 },
    /// Beyond the forecast horizon
    Future,
}

impl ForecastWindow {
    pub fn for_date(now: DateTime<Utc>, date: DateTime<Utc>) -> Self {
        if date <= now {
            ForecastWindow::Past
        } else if date >= now + Duration::days(FORECAST_HORIZON_DAYS) {
            ForecastWindow::Future
        } else {
            // forecast.json counts today as day one
            ForecastWindow::Forecast {
                days: (date - now).num_days() + 1,
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: Forecast,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    date: Option<String>,
    day: DaySummary,
}

#[derive(Debug, Deserialize)]
struct DaySummary {
    daily_will_it_rain: u8,
}

/// Reads the rain flag for `date` out of a forecast body
///
/// Falls back to the last forecast day when none matches `date` exactly.
pub fn parse_good_weather(body: &serde_json::Value, date: NaiveDate) -> Result<bool, WeatherError> {
    let response: ForecastResponse = serde_json::from_value(body.clone())
        .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
    let wanted = date.format(DATE_FORMAT).to_string();

    let day = response
        .forecast
        .forecastday
        .iter()
        .find(|day| day.date.as_deref() == Some(wanted.as_str()))
        .or_else(|| response.forecast.forecastday.last())
        .ok_or_else(|| WeatherError::InvalidResponse("empty forecast".to_string()))?;

    Ok(day.day.daily_will_it_rain == 0)
}

/// WeatherAPI.com client
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn fetch(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        date: NaiveDate,
    ) -> Result<bool, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            // An unavailable forecast does not block the match
            warn!(status = %response.status(), endpoint, "weather lookup failed; assuming good weather");
            return Ok(true);
        }

        let body: serde_json::Value = response.json().await?;
        parse_good_weather(&body, date)
    }
}

#[async_trait]
impl WeatherService for WeatherApiClient {
    async fn is_weather_good(&self, city: &str, date: DateTime<Utc>) -> Result<bool, WeatherError> {
        let window = ForecastWindow::for_date(Utc::now(), date);
        debug!(city, %date, ?window, "checking weather");

        let day = date.date_naive();
        match window {
            ForecastWindow::Past => Ok(true),
            ForecastWindow::Future => {
                let query = [
                    ("q", city.to_string()),
                    ("dt", day.format(DATE_FORMAT).to_string()),
                ];
                self.fetch("future.json", &query, day).await
            }
            ForecastWindow::Forecast { days } => {
                let query = [("q", city.to_string()), ("days", days.to_string())];
                self.fetch("forecast.json", &query, day).await
            }
        }
    }
}
