use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Units;
use crate::providers::{ApiKeys, ProviderKind};

/// Places compared when no query list is configured.
/// The full Cleopatra's needle query resolves to the monument, not the park.
pub const DEFAULT_QUERIES: &[&str] = &[
    "New York City, NY, USA",
    "Cleopatra's needle, Central Park, New York, NY, USA",
    "Bronx county, NY, USA",
    "Kings county, NY, USA",
    "New York county, NY, USA",
    "Queens county, NY, USA",
    "Richmond county, NY, USA",
    "Boston, MA, USA",
];

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub providers: Vec<ProviderKind>,
    pub provider_count: usize,
    pub queries: Vec<String>,
    pub units: Units,
    pub dirs: DirsConfig,
    pub http: HttpConfig,
    pub keys: KeysConfig,
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DirsConfig {
    /// Cached provider results
    pub geodata: PathBuf,
    /// HTML tables and GeoJSON maps
    pub html: PathBuf,
    /// Heatmaps
    pub images: PathBuf,
    pub report: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Names of the environment variables holding API keys
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KeysConfig {
    pub google_env: String,
    pub azure_env: String,
}

/// Base URL overrides, mostly for pointing at a local mock server
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EndpointsConfig {
    pub nominatim: Option<String>,
    pub google: Option<String>,
    pub arcgis: Option<String>,
    pub azure: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: ProviderKind::all().to_vec(),
            provider_count: crate::compare::DEFAULT_PROVIDER_COUNT,
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            units: Units::Both,
            dirs: DirsConfig::default(),
            http: HttpConfig::default(),
            keys: KeysConfig::default(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl Default for DirsConfig {
    fn default() -> Self {
        let geodata = PathBuf::from("geodata");
        Self {
            html: geodata.join("html_frames"),
            geodata,
            images: PathBuf::from("images"),
            report: PathBuf::from("report"),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: format!("geocompare/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            google_env: "GOO_GEO_API_1".to_string(),
            azure_env: "AZ_KEY_1".to_string(),
        }
    }
}

impl EndpointsConfig {
    pub fn for_kind(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Nominatim => self.nominatim.as_deref(),
            ProviderKind::GoogleV3 => self.google.as_deref(),
            ProviderKind::ArcGis => self.arcgis.as_deref(),
            ProviderKind::AzureMaps => self.azure.as_deref(),
        }
    }
}

impl KeysConfig {
    /// Resolve the configured variables from the process environment
    pub fn resolve(&self) -> ApiKeys {
        ApiKeys::from_env(&self.google_env, &self.azure_env)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.provider_count == 0 {
            bail!("provider_count must be at least 1");
        }
        if self.providers.len() != self.provider_count {
            bail!(
                "{} providers configured but provider_count is {}",
                self.providers.len(),
                self.provider_count
            );
        }
        let mut seen = HashSet::new();
        for p in &self.providers {
            if !seen.insert(p) {
                bail!("provider {} is listed more than once", p);
            }
        }
        if self.queries.is_empty() {
            bail!("no place queries configured");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.providers.len(), 4);
        assert_eq!(config.queries.len(), 8);
        assert_eq!(config.dirs.html, PathBuf::from("geodata/html_frames"));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            providers = ["Nominatim", "ArcGis", "azure"]
            provider_count = 3
            units = "mi"
            queries = ["Boston, MA, USA"]

            [http]
            timeout_secs = 10

            [endpoints]
            arcgis = "http://127.0.0.1:8080/find"
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.providers[2], ProviderKind::AzureMaps);
        assert_eq!(config.units, Units::Mi);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.keys.google_env, "GOO_GEO_API_1");
        assert_eq!(
            config.endpoints.for_kind(ProviderKind::ArcGis),
            Some("http://127.0.0.1:8080/find")
        );
    }

    #[test]
    fn test_provider_count_must_match() {
        let config = Config {
            provider_count: 3,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_providers_rejected() {
        let config = Config {
            providers: vec![ProviderKind::Nominatim, ProviderKind::Nominatim],
            provider_count: 2,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
