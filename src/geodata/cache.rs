//! JSON cache files, one per provider (and optional prefix).

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::FetchError;
use crate::models::{NormalizedRecord, RecordMap};
use crate::providers::ProviderKind;

/// All results of one provider, keyed by place in query order
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderGeodata {
    pub provider: ProviderKind,
    pub places: RecordMap,
}

impl ProviderGeodata {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            places: RecordMap::new(),
        }
    }

    pub fn insert(&mut self, place: impl Into<String>, record: Option<NormalizedRecord>) {
        self.places.insert(place, record);
    }

    /// `None` if the place was never queried; `Some(None)` if the geocode came back empty
    pub fn get(&self, place: &str) -> Option<Option<&NormalizedRecord>> {
        self.places.get(place)
    }
}

/// `geodata_Nom.json`, or `<prefix>_geodata_Nom.json`
pub fn cache_file_name(provider: ProviderKind, prefix: Option<&str>) -> String {
    let base = format!("geodata_{}.json", provider.short_name());
    match prefix.filter(|p| !p.is_empty()) {
        Some(p) if p.ends_with('_') => format!("{}{}", p, base),
        Some(p) => format!("{}_{}", p, base),
        None => base,
    }
}

/// Age of a file since its last modification
pub fn file_age(path: &Path) -> Option<chrono::Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(Utc::now() - DateTime::<Utc>::from(modified))
}

fn describe_age(age: chrono::Duration) -> String {
    format!(
        "{}d {}h {}m {}s old",
        age.num_days(),
        age.num_hours() % 24,
        age.num_minutes() % 60,
        age.num_seconds() % 60
    )
}

/// Read a cache file; `Ok(None)` if it does not exist
pub fn read_cache(path: &Path, provider: ProviderKind) -> Result<Option<ProviderGeodata>, FetchError> {
    if !path.exists() {
        debug!("Not found: {}", path.display());
        return Ok(None);
    }

    if path.extension().map_or(true, |e| e != "json") {
        return Err(FetchError::NotJson(path.display().to_string()));
    }

    match file_age(path) {
        Some(age) => info!("Found: {}, {}", path.display(), describe_age(age)),
        None => info!("Found: {}", path.display()),
    }

    let reader = BufReader::new(File::open(path)?);
    let places: RecordMap = serde_json::from_reader(reader)?;

    Ok(Some(ProviderGeodata { provider, places }))
}

/// Write (overwriting) a cache file, creating its directory if needed
pub fn write_cache(path: &Path, data: &ProviderGeodata) -> Result<(), FetchError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &data.places)?;
    writer.flush()?;

    info!(
        "Saved {} places for {} to {}",
        data.places.len(),
        data.provider,
        path.display()
    );
    Ok(())
}
