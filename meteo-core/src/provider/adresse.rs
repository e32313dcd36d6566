use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::UpstreamError, model::LocationResult};

use super::Geocoder;

/// Address-search geocoder (api-adresse.data.gouv.fr and compatible).
#[derive(Debug, Clone)]
pub struct AdresseGeocoder {
    endpoint: String,
    http: Client,
}

impl AdresseGeocoder {
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
struct AdGeometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct AdProperties {
    city: Option<String>,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdFeature {
    geometry: AdGeometry,
    properties: Option<AdProperties>,
}

/// `features` and `properties` may be absent or `null`.
#[derive(Debug, Deserialize)]
struct AdResponse {
    features: Option<Vec<AdFeature>>,
}

impl AdResponse {
    fn into_location(self, postal_code: &str) -> Result<LocationResult, UpstreamError> {
        let feature = self
            .features
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(UpstreamError::PostalCodeNotFound)?;

        let [longitude, latitude, ..] = feature.geometry.coordinates[..] else {
            return Err(UpstreamError::MalformedFeature("coordonnées manquantes"));
        };

        let AdProperties { city, label } = feature.properties.unwrap_or_default();
        let city_name = city
            .filter(|c| !c.is_empty())
            .or(label.filter(|l| !l.is_empty()))
            .unwrap_or_else(|| postal_code.to_string());

        Ok(LocationResult {
            city_name,
            longitude,
            latitude,
        })
    }
}

#[async_trait]
impl Geocoder for AdresseGeocoder {
    async fn locate(&self, postal_code: &str) -> Result<LocationResult, UpstreamError> {
        tracing::debug!(endpoint = %self.endpoint, postal_code, "geocoding postal code");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", postal_code), ("limit", "1")])
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                context: "Échec de la requête au service de géocodage",
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, "geocoding request failed");
            return Err(UpstreamError::GeocodingStatus(status.as_u16()));
        }

        let body = res.text().await.map_err(|source| UpstreamError::Transport {
            context: "Échec de la lecture de la réponse de géocodage",
            source,
        })?;

        let parsed: AdResponse =
            serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
                context: "Réponse de géocodage illisible",
                source,
            })?;

        let location = parsed.into_location(postal_code)?;
        tracing::info!(
            city = %location.city_name,
            lat = location.latitude,
            lon = location.longitude,
            "resolved postal code"
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parse(value: serde_json::Value) -> AdResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn prefers_city_over_label() {
        let loc = parse(json!({
            "features": [{
                "geometry": { "coordinates": [2.35, 48.86] },
                "properties": { "city": "Paris", "label": "Paris 1er" }
            }]
        }))
        .into_location("75001")
        .unwrap();

        assert_eq!(loc.city_name, "Paris");
        assert_eq!(loc.longitude, 2.35);
        assert_eq!(loc.latitude, 48.86);
    }

    #[test]
    fn falls_back_to_label_then_postal_code() {
        let loc = parse(json!({
            "features": [{
                "geometry": { "coordinates": [5.0, 45.0] },
                "properties": { "city": "", "label": "Lieu-dit" }
            }]
        }))
        .into_location("38000")
        .unwrap();
        assert_eq!(loc.city_name, "Lieu-dit");

        let loc = parse(json!({
            "features": [{ "geometry": { "coordinates": [5.0, 45.0] } }]
        }))
        .into_location("38000")
        .unwrap();
        assert_eq!(loc.city_name, "38000");
    }

    #[test]
    fn empty_or_missing_features_means_not_found() {
        let err = parse(json!({ "features": [] })).into_location("00000").unwrap_err();
        assert!(matches!(err, UpstreamError::PostalCodeNotFound));

        let err = parse(json!({})).into_location("00000").unwrap_err();
        assert!(matches!(err, UpstreamError::PostalCodeNotFound));

        let err = parse(json!({ "features": null })).into_location("00000").unwrap_err();
        assert!(matches!(err, UpstreamError::PostalCodeNotFound));
    }

    #[test]
    fn null_properties_fall_back_to_postal_code() {
        let loc = parse(json!({
            "features": [{
                "geometry": { "coordinates": [5.0, 45.0] },
                "properties": null
            }]
        }))
        .into_location("38000")
        .unwrap();
        assert_eq!(loc.city_name, "38000");
        assert_eq!(loc.latitude, 45.0);
    }

    #[test]
    fn short_coordinates_are_malformed() {
        let err = parse(json!({
            "features": [{ "geometry": { "coordinates": [2.35] } }]
        }))
        .into_location("75001")
        .unwrap_err();
        assert!(matches!(err, UpstreamError::MalformedFeature(_)));
    }

    #[tokio::test]
    async fn sends_postal_code_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/"))
            .and(query_param("q", "75001"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [{
                    "geometry": { "coordinates": [2.35, 48.86] },
                    "properties": { "city": "Paris" }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let geocoder = AdresseGeocoder::new(format!("{}/search/", server.uri()));
        let loc = geocoder.locate("75001").await.unwrap();
        assert_eq!(loc.city_name, "Paris");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let geocoder = AdresseGeocoder::new(format!("{}/search/", server.uri()));
        let err = geocoder.locate("75001").await.unwrap_err();
        assert!(matches!(err, UpstreamError::GeocodingStatus(503)));
        assert_eq!(err.to_string(), "Erreur lors du géocodage du code postal");
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let geocoder = AdresseGeocoder::new(format!("{}/search/", server.uri()));
        let err = geocoder.locate("75001").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { .. }));
        assert!(err.to_string().starts_with("Réponse de géocodage illisible: "));
    }
}
