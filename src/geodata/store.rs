//! Cache-or-fetch access to provider results.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::cache::{cache_file_name, read_cache, write_cache, ProviderGeodata};
use super::collection::GeodataCollection;
use super::places::PlaceQuery;
use crate::config::{Config, EndpointsConfig, KeysConfig};
use crate::error::FetchError;
use crate::models::NormalizedRecord;
use crate::providers::{build_geocoder, ApiKeys, Geocoder, ProviderKind};

/// Where results may come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Use the cache file if present, otherwise fetch and save
    PreferCache,
    /// Always fetch and overwrite the cache
    Refresh,
    /// Read `<prefix>_geodata_*.json` only; never fetch or overwrite
    Prefixed(String),
}

/// Loads provider results from the cache directory or over HTTP.
///
/// Requests run one at a time with the configured timeout and no retry.
pub struct GeodataStore {
    client: Client,
    geodata_dir: PathBuf,
    keys: ApiKeys,
    key_vars: KeysConfig,
    endpoints: EndpointsConfig,
}

impl GeodataStore {
    pub fn new(config: &Config, keys: ApiKeys) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|source| FetchError::Http {
                provider: "client".to_string(),
                source,
            })?;

        Ok(Self {
            client,
            geodata_dir: config.dirs.geodata.clone(),
            keys,
            key_vars: config.keys.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn geodata_dir(&self) -> &Path {
        &self.geodata_dir
    }

    pub fn cache_path(&self, provider: ProviderKind, prefix: Option<&str>) -> PathBuf {
        self.geodata_dir.join(cache_file_name(provider, prefix))
    }

    /// Results of one provider for every query, following `policy`
    pub async fn load(
        &self,
        provider: ProviderKind,
        queries: &[PlaceQuery],
        policy: &LoadPolicy,
    ) -> Result<ProviderGeodata, FetchError> {
        match policy {
            LoadPolicy::Prefixed(prefix) => {
                let path = self.cache_path(provider, Some(prefix.as_str()));
                read_cache(&path, provider)?.ok_or_else(|| {
                    warn!("Non overwritable file not found: {}", path.display());
                    FetchError::NotFound(path.display().to_string())
                })
            }
            LoadPolicy::PreferCache => {
                let path = self.cache_path(provider, None);
                match read_cache(&path, provider)? {
                    Some(data) => {
                        warn_missing_places(&data, queries);
                        Ok(data)
                    }
                    None => self.fetch_and_save(provider, queries).await,
                }
            }
            LoadPolicy::Refresh => self.fetch_and_save(provider, queries).await,
        }
    }

    /// Load every provider, in the given order
    pub async fn load_all(
        &self,
        providers: &[ProviderKind],
        queries: &[PlaceQuery],
        policy: &LoadPolicy,
    ) -> Result<GeodataCollection, FetchError> {
        match policy {
            LoadPolicy::Refresh => info!("Fetching geodata..."),
            _ => info!("Loading geodata..."),
        }

        let mut sets = Vec::with_capacity(providers.len());
        for provider in providers {
            sets.push(self.load(*provider, queries, policy).await?);
        }

        info!("All geodata gathered for {} providers", sets.len());
        Ok(GeodataCollection::new(sets))
    }

    async fn fetch_and_save(
        &self,
        provider: ProviderKind,
        queries: &[PlaceQuery],
    ) -> Result<ProviderGeodata, FetchError> {
        let data = self.fetch(provider, queries).await?;
        write_cache(&self.cache_path(provider, None), &data)?;
        Ok(data)
    }

    /// Query the provider for every place, without touching the cache
    pub async fn fetch(
        &self,
        provider: ProviderKind,
        queries: &[PlaceQuery],
    ) -> Result<ProviderGeodata, FetchError> {
        let geocoder = build_geocoder(
            provider,
            &self.keys,
            (self.key_vars.google_env.as_str(), self.key_vars.azure_env.as_str()),
        )?;
        let endpoint = Url::parse(
            self.endpoints
                .for_kind(provider)
                .unwrap_or_else(|| geocoder.default_endpoint()),
        )?;

        info!("Fetching {} places from {}", queries.len(), provider);

        let pb = ProgressBar::new(queries.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message(provider.name());

        let mut data = ProviderGeodata::new(provider);
        for q in queries {
            let record = self.geocode(geocoder.as_ref(), &endpoint, &q.query).await;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };

            if record.is_none() {
                warn!("{} found nothing for '{}'", provider, q.query);
            }
            data.insert(q.key.clone(), record);
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(data)
    }

    async fn geocode(
        &self,
        geocoder: &dyn Geocoder,
        endpoint: &Url,
        query: &str,
    ) -> Result<Option<NormalizedRecord>, FetchError> {
        let provider = geocoder.kind().to_string();
        let url = geocoder.request_url(endpoint, query);
        debug!("{} request: {}", provider, query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                provider: provider.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Http {
                provider: provider.clone(),
                source,
            })?;

        geocoder.normalize(&body)
    }
}

fn warn_missing_places(data: &ProviderGeodata, queries: &[PlaceQuery]) {
    for q in queries {
        if data.get(&q.key).is_none() {
            warn!(
                "Cached {} results have no entry for '{}'; use a refresh to fetch it",
                data.provider, q.key
            );
        }
    }
}
