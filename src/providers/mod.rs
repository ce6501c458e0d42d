//! Geocoding provider adapters.
//!
//! Every provider answers a place query with its own JSON layout. Each
//! adapter builds the request URL for its service and turns the raw body
//! into a [`NormalizedRecord`], so nothing downstream depends on which
//! provider produced a record.

mod arcgis;
mod azure;
mod google;
mod nominatim;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;
use crate::models::NormalizedRecord;

pub use arcgis::ArcGis;
pub use azure::AzureMaps;
pub use google::GoogleV3;
pub use nominatim::Nominatim;

/// The geocoding services this crate knows how to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(alias = "nominatim")]
    Nominatim,
    #[serde(alias = "googlev3", alias = "google")]
    GoogleV3,
    #[serde(alias = "arcgis", alias = "ArcGIS")]
    ArcGis,
    #[serde(alias = "azuremaps", alias = "azure")]
    AzureMaps,
}

impl ProviderKind {
    pub fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::Nominatim,
            ProviderKind::GoogleV3,
            ProviderKind::ArcGis,
            ProviderKind::AzureMaps,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Nominatim => "Nominatim",
            ProviderKind::GoogleV3 => "GoogleV3",
            ProviderKind::ArcGis => "ArcGis",
            ProviderKind::AzureMaps => "AzureMaps",
        }
    }

    /// Three-letter tag used in cache file names
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    /// Marker/box color on maps
    pub fn color(&self) -> &'static str {
        match self {
            ProviderKind::Nominatim => "red",
            ProviderKind::GoogleV3 => "green",
            ProviderKind::ArcGis => "darkblue",
            ProviderKind::AzureMaps => "cyan",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ProviderKind::all()
            .iter()
            .find(|k| k.name().to_ascii_lowercase() == wanted)
            .copied()
            .ok_or_else(|| FetchError::UnknownProvider(s.to_string()))
    }
}

/// API keys resolved from the environment, passed explicitly to adapters
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub google: Option<String>,
    pub azure: Option<String>,
}

impl ApiKeys {
    /// Read keys from the named environment variables; empty values count as absent
    pub fn from_env(google_var: &str, azure_var: &str) -> Self {
        let read = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        Self {
            google: read(google_var),
            azure: read(azure_var),
        }
    }
}

/// One provider's request/response contract
pub trait Geocoder: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Base URL used when no override is configured
    fn default_endpoint(&self) -> &'static str;

    /// Full request URL for a single place query
    fn request_url(&self, endpoint: &Url, query: &str) -> Url;

    /// Normalize a raw response body; `Ok(None)` means the provider found nothing
    fn normalize(&self, body: &[u8]) -> Result<Option<NormalizedRecord>, FetchError>;
}

/// Build the adapter for `kind`, checking that its key is available
pub fn build_geocoder(
    kind: ProviderKind,
    keys: &ApiKeys,
    key_vars: (&str, &str),
) -> Result<Box<dyn Geocoder>, FetchError> {
    let missing = |env_var: &str| FetchError::MissingApiKey {
        provider: kind.to_string(),
        env_var: env_var.to_string(),
    };

    let geocoder: Box<dyn Geocoder> = match kind {
        ProviderKind::Nominatim => Box::new(Nominatim),
        ProviderKind::ArcGis => Box::new(ArcGis),
        ProviderKind::GoogleV3 => {
            let key = keys.google.clone().ok_or_else(|| missing(key_vars.0))?;
            Box::new(GoogleV3::new(key))
        }
        ProviderKind::AzureMaps => {
            let key = keys.azure.clone().ok_or_else(|| missing(key_vars.1))?;
            Box::new(AzureMaps::new(key))
        }
    };
    Ok(geocoder)
}

fn decode<T: DeserializeOwned>(kind: ProviderKind, body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|source| FetchError::Decode {
        provider: kind.to_string(),
        source,
    })
}
