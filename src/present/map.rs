//! GeoJSON maps of provider locations and boxes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::models::{LatLon, PlaceResultSet};
use crate::providers::ProviderKind;

const FALLBACK_COLOR: &str = "gray";

fn position(p: LatLon) -> Value {
    json!([p.lon, p.lat])
}

fn provider_color(name: &str) -> &'static str {
    name.parse::<ProviderKind>()
        .map(|k| k.color())
        .unwrap_or(FALLBACK_COLOR)
}

/// Mean of the available locations
fn mean_location(results: &PlaceResultSet) -> Option<LatLon> {
    let locations: Vec<LatLon> = results.iter().filter_map(|(_, r)| r.map(|r| r.location)).collect();
    if locations.is_empty() {
        return None;
    }
    let n = locations.len() as f64;
    Some(LatLon::new(
        locations.iter().map(|l| l.lat).sum::<f64>() / n,
        locations.iter().map(|l| l.lon).sum::<f64>() / n,
    ))
}

/// FeatureCollection with a location point and a box outline per provider.
///
/// Providers without a record are left out.
pub fn place_geojson(results: &PlaceResultSet) -> Value {
    let mut features = Vec::new();

    for (provider, record) in results.iter() {
        let Some(record) = record else {
            debug!("{} has no record for {}", provider, results.place());
            continue;
        };
        let color = provider_color(provider);

        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": position(record.location) },
            "properties": {
                "provider": provider,
                "color": color,
                "kind": "location",
                "tooltip": format!("{} location: {}", provider, record.location.rounded()),
            },
        }));

        let b = record.bbox;
        let ring: Vec<Value> = [b.ne, b.se(), b.sw, b.nw(), b.ne]
            .into_iter()
            .map(position)
            .collect();
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": ring },
            "properties": {
                "provider": provider,
                "color": color,
                "kind": "box",
                "tooltip": format!("{} box for {}", provider, results.place()),
            },
        }));
    }

    let mut collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    if let (Some(center), Some(obj)) = (mean_location(results), collection.as_object_mut()) {
        obj.insert("center".to_string(), position(center));
    }
    collection
}

/// `<dir>/<place_with_underscores>.geojson` for every result set
pub fn write_place_maps(dir: &Path, results: &[&PlaceResultSet]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(results.len());
    for set in results {
        let path = dir.join(format!("{}.geojson", set.place().replace(' ', "_")));
        let body = serde_json::to_string_pretty(&place_geojson(set))?;
        fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    info!("Wrote {} maps to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, NormalizedRecord};

    fn results() -> PlaceResultSet {
        PlaceResultSet::new("New York City")
            .with(
                "Nominatim",
                Some(NormalizedRecord::new(
                    LatLon::new(40.0, -74.0),
                    BoundingBox::from_extent(39.0, -75.0, 41.0, -73.0),
                )),
            )
            .with(
                "GoogleV3",
                Some(NormalizedRecord::new(
                    LatLon::new(42.0, -72.0),
                    BoundingBox::from_extent(41.0, -73.0, 43.0, -71.0),
                )),
            )
            .with("ArcGis", None)
    }

    #[test]
    fn test_features_per_provider() {
        let map = place_geojson(&results());
        let features = map["features"].as_array().unwrap();
        assert_eq!(features.len(), 4);

        assert_eq!(features[0]["geometry"]["coordinates"], json!([-74.0, 40.0]));
        assert_eq!(features[0]["properties"]["color"], "red");
        assert_eq!(features[3]["properties"]["color"], "green");
        assert_eq!(features[3]["properties"]["kind"], "box");

        let ring = features[1]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], json!([-73.0, 41.0]));
        assert_eq!(ring[1], json!([-73.0, 39.0]));
        assert_eq!(ring[2], json!([-75.0, 39.0]));
        assert_eq!(ring[3], json!([-75.0, 41.0]));
        assert_eq!(ring[0], ring[4]);

        assert_eq!(map["center"], json!([-73.0, 41.0]));
    }

    #[test]
    fn test_write_uses_underscored_name() {
        let dir = tempfile::tempdir().unwrap();
        let set = results();
        let written = write_place_maps(dir.path(), &[&set]).unwrap();
        assert_eq!(written, vec![dir.path().join("New_York_City.geojson")]);
    }
}
