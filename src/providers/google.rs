//! Google Maps Geocoding API (v3).

use serde::Deserialize;
use url::Url;

use super::{decode, Geocoder, ProviderKind};
use crate::error::FetchError;
use crate::models::{BoundingBox, LatLon, NormalizedRecord};

const ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub struct GoogleV3 {
    api_key: String,
}

impl GoogleV3 {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    results: Vec<GoogleResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GooglePoint,
    viewport: GoogleViewport,
}

#[derive(Debug, Deserialize)]
struct GoogleViewport {
    northeast: GooglePoint,
    southwest: GooglePoint,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct GooglePoint {
    lat: f64,
    lng: f64,
}

impl From<GooglePoint> for LatLon {
    fn from(p: GooglePoint) -> Self {
        LatLon::new(p.lat, p.lng)
    }
}

impl Geocoder for GoogleV3 {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GoogleV3
    }

    fn default_endpoint(&self) -> &'static str {
        ENDPOINT
    }

    fn request_url(&self, endpoint: &Url, query: &str) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", &self.api_key);
        url
    }

    fn normalize(&self, body: &[u8]) -> Result<Option<NormalizedRecord>, FetchError> {
        let response: GoogleResponse = decode(self.kind(), body)?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            other => {
                return Err(FetchError::Malformed {
                    provider: self.kind().to_string(),
                    message: format!(
                        "status {}{}",
                        other,
                        response
                            .error_message
                            .map(|m| format!(": {}", m))
                            .unwrap_or_default()
                    ),
                })
            }
        }

        Ok(response.results.into_iter().next().map(|r| {
            NormalizedRecord::new(
                r.geometry.location.into(),
                BoundingBox::new(
                    r.geometry.viewport.northeast.into(),
                    r.geometry.viewport.southwest.into(),
                ),
            )
        }))
    }
}
