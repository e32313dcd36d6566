use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::UpstreamError,
    model::{DailySeries, LocationResult},
    validate::FORECAST_HORIZON_DAYS,
};

use super::{ForecastSource, truncate_body};

/// Daily attributes requested for every lookup.
pub const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,\
precipitation_probability_max,windspeed_10m_max,relative_humidity_2m_max,sunrise,sunset";

/// Open-Meteo daily forecast client.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    endpoint: String,
    http: Client,
}

impl OpenMeteoForecast {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Option<Vec<String>>,
    weathercode: Option<Vec<Option<i32>>>,
    temperature_2m_max: Option<Vec<Option<f64>>>,
    temperature_2m_min: Option<Vec<Option<f64>>>,
    precipitation_probability_max: Option<Vec<Option<f64>>>,
    windspeed_10m_max: Option<Vec<Option<f64>>>,
    relative_humidity_2m_max: Option<Vec<Option<f64>>>,
    sunrise: Option<Vec<Option<String>>>,
    sunset: Option<Vec<Option<String>>>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    daily: Option<OmDaily>,
}

/// Every parallel array must be present and as long as `daily.time`.
fn aligned<T>(
    series: Option<Vec<T>>,
    name: &'static str,
    len: usize,
) -> Result<Vec<T>, UpstreamError> {
    match series {
        Some(values) if values.len() == len => Ok(values),
        _ => Err(UpstreamError::IncompleteSeries(name)),
    }
}

fn timestamps(series: Vec<Option<String>>) -> Vec<String> {
    series.into_iter().map(Option::unwrap_or_default).collect()
}

impl TryFrom<OmDaily> for DailySeries {
    type Error = UpstreamError;

    fn try_from(daily: OmDaily) -> Result<Self, Self::Error> {
        let time = daily.time.ok_or(UpstreamError::MissingDaily)?;
        let len = time.len();

        let time = time
            .into_iter()
            .map(|t| {
                NaiveDate::parse_from_str(&t, "%Y-%m-%d")
                    .map_err(|_| UpstreamError::MalformedDate(t))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DailySeries {
            time,
            weather_code: aligned(daily.weathercode, "weathercode", len)?,
            temperature_max: aligned(daily.temperature_2m_max, "temperature_2m_max", len)?,
            temperature_min: aligned(daily.temperature_2m_min, "temperature_2m_min", len)?,
            precipitation_probability_max: aligned(
                daily.precipitation_probability_max,
                "precipitation_probability_max",
                len,
            )?,
            windspeed_max: aligned(daily.windspeed_10m_max, "windspeed_10m_max", len)?,
            relative_humidity_max: aligned(
                daily.relative_humidity_2m_max,
                "relative_humidity_2m_max",
                len,
            )?,
            sunrise: timestamps(aligned(daily.sunrise, "sunrise", len)?),
            sunset: timestamps(aligned(daily.sunset, "sunset", len)?),
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    async fn daily_forecast(
        &self,
        location: &LocationResult,
    ) -> Result<DailySeries, UpstreamError> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let forecast_days = FORECAST_HORIZON_DAYS.to_string();

        tracing::debug!(endpoint = %self.endpoint, %latitude, %longitude, "fetching daily forecast");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("forecast_days", forecast_days.as_str()),
            ])
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                context: "Échec de la requête au service de prévisions",
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| UpstreamError::Transport {
            context: "Échec de la lecture de la réponse météo",
            source,
        })?;

        if !status.is_success() {
            tracing::warn!(%status, "forecast request failed");
            return Err(UpstreamError::ForecastStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse =
            serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
                context: "Réponse météo illisible",
                source,
            })?;

        parsed
            .daily
            .ok_or(UpstreamError::MissingDaily)?
            .try_into()
    }
}
