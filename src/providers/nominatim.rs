//! OpenStreetMap Nominatim search API.

use serde::Deserialize;
use url::Url;

use super::{decode, Geocoder, ProviderKind};
use crate::error::FetchError;
use crate::models::{BoundingBox, LatLon, NormalizedRecord};

const ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim needs no key; results are biased to the USA
pub struct Nominatim;

/// Coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    /// [south, north, west, east]
    boundingbox: [String; 4],
}

impl Geocoder for Nominatim {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Nominatim
    }

    fn default_endpoint(&self) -> &'static str {
        ENDPOINT
    }

    fn request_url(&self, endpoint: &Url, query: &str) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1")
            .append_pair("addressdetails", "1")
            .append_pair("countrycodes", "us");
        url
    }

    fn normalize(&self, body: &[u8]) -> Result<Option<NormalizedRecord>, FetchError> {
        let places: Vec<NominatimPlace> = decode(self.kind(), body)?;
        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let num = |s: &str| {
            s.trim().parse::<f64>().map_err(|_| FetchError::Malformed {
                provider: self.kind().to_string(),
                message: format!("not a number: {:?}", s),
            })
        };

        let [south, north, west, east] = &place.boundingbox;

        Ok(Some(NormalizedRecord::new(
            LatLon::new(num(place.lat.as_str())?, num(place.lon.as_str())?),
            BoundingBox::from_extent(
                num(south.as_str())?,
                num(west.as_str())?,
                num(north.as_str())?,
                num(east.as_str())?,
            ),
        )))
    }
}
