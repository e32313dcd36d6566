use crate::{
    Config,
    error::UpstreamError,
    model::{DailySeries, LocationResult},
    provider::{adresse::AdresseGeocoder, openmeteo::OpenMeteoForecast},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod adresse;
pub mod openmeteo;

/// Resolves a postal code to coordinates and a display name.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn locate(&self, postal_code: &str) -> Result<LocationResult, UpstreamError>;
}

/// Fetches the daily forecast series for a location.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn daily_forecast(&self, location: &LocationResult)
    -> Result<DailySeries, UpstreamError>;
}

/// Construct the address-search geocoder from config.
pub fn geocoder_from_config(config: &Config) -> Box<dyn Geocoder> {
    Box::new(AdresseGeocoder::new(config.geocoding_url.clone()))
}

/// Construct the daily forecast source from config.
pub fn forecast_from_config(config: &Config) -> Box<dyn ForecastSource> {
    Box::new(OpenMeteoForecast::new(config.forecast_url.clone()))
}

/// Shorten an error body for display, cutting on a char boundary.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("bad request"), "bad request");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let body = "é".repeat(250);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }

    #[test]
    fn providers_from_default_config() {
        let cfg = Config::default();
        let geocoder = geocoder_from_config(&cfg);
        let forecast = forecast_from_config(&cfg);
        assert!(format!("{geocoder:?}").contains("api-adresse.data.gouv.fr"));
        assert!(format!("{forecast:?}").contains("api.open-meteo.com"));
    }
}
