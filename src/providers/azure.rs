//! Azure Maps address search.

use serde::Deserialize;
use url::Url;

use super::{decode, Geocoder, ProviderKind};
use crate::error::FetchError;
use crate::models::{BoundingBox, LatLon, NormalizedRecord};

const ENDPOINT: &str = "https://atlas.microsoft.com/search/address/json";

pub struct AzureMaps {
    subscription_key: String,
}

impl AzureMaps {
    pub fn new(subscription_key: String) -> Self {
        Self { subscription_key }
    }
}

#[derive(Debug, Deserialize)]
struct AzureResponse {
    #[serde(default)]
    results: Vec<AzureResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureResult {
    position: AzurePoint,
    viewport: AzureViewport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureViewport {
    top_left_point: AzurePoint,
    btm_right_point: AzurePoint,
}

#[derive(Debug, Deserialize)]
struct AzurePoint {
    lat: f64,
    lon: f64,
}

impl Geocoder for AzureMaps {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AzureMaps
    }

    fn default_endpoint(&self) -> &'static str {
        ENDPOINT
    }

    fn request_url(&self, endpoint: &Url, query: &str) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("subscription-key", &self.subscription_key)
            .append_pair("api-version", "1.0")
            .append_pair("query", query)
            .append_pair("typeahead", "false")
            .append_pair("limit", "1");
        url
    }

    fn normalize(&self, body: &[u8]) -> Result<Option<NormalizedRecord>, FetchError> {
        let response: AzureResponse = decode(self.kind(), body)?;

        // The viewport is given as top-left / bottom-right corners
        Ok(response.results.into_iter().next().map(|r| {
            let tl = r.viewport.top_left_point;
            let br = r.viewport.btm_right_point;
            NormalizedRecord::new(
                LatLon::new(r.position.lat, r.position.lon),
                BoundingBox::new(LatLon::new(tl.lat, br.lon), LatLon::new(br.lat, tl.lon)),
            )
        }))
    }
}
