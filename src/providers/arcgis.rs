//! Esri ArcGIS World Geocoding Service.

use serde::Deserialize;
use url::Url;

use super::{decode, Geocoder, ProviderKind};
use crate::error::FetchError;
use crate::models::{BoundingBox, LatLon, NormalizedRecord};

const ENDPOINT: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates";

/// Anonymous access; no key required
pub struct ArcGis;

#[derive(Debug, Deserialize)]
struct ArcGisResponse {
    #[serde(default)]
    candidates: Vec<ArcGisCandidate>,
}

#[derive(Debug, Deserialize)]
struct ArcGisCandidate {
    location: ArcGisPoint,
    extent: ArcGisExtent,
}

#[derive(Debug, Deserialize)]
struct ArcGisPoint {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct ArcGisExtent {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Geocoder for ArcGis {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ArcGis
    }

    fn default_endpoint(&self) -> &'static str {
        ENDPOINT
    }

    fn request_url(&self, endpoint: &Url, query: &str) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("SingleLine", query)
            .append_pair("f", "json")
            .append_pair("maxLocations", "1")
            .append_pair("outSR", "4326");
        url
    }

    fn normalize(&self, body: &[u8]) -> Result<Option<NormalizedRecord>, FetchError> {
        let response: ArcGisResponse = decode(self.kind(), body)?;

        Ok(response.candidates.into_iter().next().map(|c| {
            NormalizedRecord::new(
                LatLon::new(c.location.y, c.location.x),
                BoundingBox::from_extent(c.extent.ymin, c.extent.xmin, c.extent.ymax, c.extent.xmax),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extent() {
        let body = br#"{
            "spatialReference": {"wkid": 4326},
            "candidates": [{
                "address": "Bronx County, New York",
                "location": {"x": -73.86479, "y": 40.84466},
                "score": 100,
                "extent": {"xmin": -73.93379, "ymin": 40.78566, "xmax": -73.79579, "ymax": 40.90366}
            }]
        }"#;
        let r = ArcGis.normalize(body).unwrap().unwrap();
        assert_eq!(r.location, LatLon::new(40.84466, -73.86479));
        assert_eq!(r.bbox.ne, LatLon::new(40.90366, -73.79579));
        assert_eq!(r.bbox.sw, LatLon::new(40.78566, -73.93379));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(ArcGis.normalize(br#"{"candidates": []}"#).unwrap(), None);
    }
}
