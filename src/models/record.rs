//! Normalized geocoding records and the ordered maps that hold them.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Geographic point, serialized as `[lat, lon]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Round both coordinates to 6 decimals
    pub fn rounded(&self) -> Self {
        Self {
            lat: round6(self.lat),
            lon: round6(self.lon),
        }
    }
}

impl From<[f64; 2]> for LatLon {
    fn from(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[0],
            lon: pair[1],
        }
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(p: LatLon) -> Self {
        [p.lat, p.lon]
    }
}

impl From<LatLon> for geo_types::Point<f64> {
    fn from(p: LatLon) -> Self {
        geo_types::Point::new(p.lon, p.lat)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat, self.lon)
    }
}

/// Bounding box as two corners, serialized as `[[NE lat, NE lon], [SW lat, SW lon]]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[LatLon; 2]", into = "[LatLon; 2]")]
pub struct BoundingBox {
    pub ne: LatLon,
    pub sw: LatLon,
}

impl BoundingBox {
    pub fn new(ne: LatLon, sw: LatLon) -> Self {
        Self { ne, sw }
    }

    /// Build from the extreme latitudes/longitudes of an extent
    pub fn from_extent(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            ne: LatLon::new(north, east),
            sw: LatLon::new(south, west),
        }
    }

    /// South-east corner
    pub fn se(&self) -> LatLon {
        LatLon::new(self.sw.lat, self.ne.lon)
    }

    /// North-west corner
    pub fn nw(&self) -> LatLon {
        LatLon::new(self.ne.lat, self.sw.lon)
    }

    /// Flat arithmetic midpoint of the NE and SW corners
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.ne.lat + self.sw.lat) / 2.0,
            (self.ne.lon + self.sw.lon) / 2.0,
        )
    }

    /// The four corner coordinates in `[NE lat, NE lon, SW lat, SW lon]` order
    pub fn coordinates(&self) -> [f64; 4] {
        [self.ne.lat, self.ne.lon, self.sw.lat, self.sw.lon]
    }
}

impl From<[LatLon; 2]> for BoundingBox {
    fn from(corners: [LatLon; 2]) -> Self {
        Self {
            ne: corners[0],
            sw: corners[1],
        }
    }
}

impl From<BoundingBox> for [LatLon; 2] {
    fn from(b: BoundingBox) -> Self {
        [b.ne, b.sw]
    }
}

/// One provider's result for one place, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    #[serde(rename = "loc")]
    pub location: LatLon,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

impl NormalizedRecord {
    pub fn new(location: LatLon, bbox: BoundingBox) -> Self {
        Self { location, bbox }
    }
}

/// Wire shape of a cache entry; a failed geocode is stored as `{}`.
#[derive(Default, Serialize, Deserialize)]
struct RawEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    loc: Option<LatLon>,
    #[serde(rename = "box", skip_serializing_if = "Option::is_none")]
    bbox: Option<BoundingBox>,
}

impl From<Option<NormalizedRecord>> for RawEntry {
    fn from(record: Option<NormalizedRecord>) -> Self {
        match record {
            Some(r) => Self {
                loc: Some(r.location),
                bbox: Some(r.bbox),
            },
            None => Self::default(),
        }
    }
}

impl RawEntry {
    fn into_record(self) -> Option<NormalizedRecord> {
        match (self.loc, self.bbox) {
            (Some(location), Some(bbox)) => Some(NormalizedRecord { location, bbox }),
            _ => None,
        }
    }
}

/// Insertion-ordered map of key → optional record.
///
/// Serialized as a JSON object whose key order follows insertion order.
/// `None` values stand for empty records and are written as `{}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordMap {
    entries: Vec<(String, Option<NormalizedRecord>)>,
}

impl RecordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `key`, keeping its original position
    pub fn insert(&mut self, key: impl Into<String>, record: Option<NormalizedRecord>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = record,
            None => self.entries.push((key, record)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// `None` if the key is absent; `Some(None)` if present but empty
    pub fn get(&self, key: &str) -> Option<Option<&NormalizedRecord>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, r)| r.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&NormalizedRecord>)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RecordMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, &RawEntry::from(*record))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordMapVisitor;

        impl<'de> Visitor<'de> for RecordMapVisitor {
            type Value = RecordMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of place name to {loc, box} records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RecordMap, A::Error> {
                let mut map = RecordMap::new();
                while let Some((key, entry)) = access.next_entry::<String, RawEntry>()? {
                    map.insert(key, entry.into_record());
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(RecordMapVisitor)
    }
}

/// Results of every compared provider for one place.
///
/// Providers keep the order in which they were inserted; that order drives
/// pair enumeration in the comparison engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResultSet {
    place: String,
    providers: RecordMap,
}

impl PlaceResultSet {
    pub fn new(place: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            providers: RecordMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, provider: impl Into<String>, record: Option<NormalizedRecord>) -> Self {
        self.insert(provider, record);
        self
    }

    pub fn insert(&mut self, provider: impl Into<String>, record: Option<NormalizedRecord>) {
        self.providers.insert(provider, record);
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn get(&self, provider: &str) -> Option<&NormalizedRecord> {
        self.providers.get(provider).flatten()
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&NormalizedRecord>)> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Round to 6 decimal places
pub fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nyc() -> NormalizedRecord {
        NormalizedRecord::new(
            LatLon::new(40.7127281, -74.0060152),
            BoundingBox::from_extent(40.4773991, -74.2590899, 40.9175771, -73.7002721),
        )
    }

    #[test]
    fn test_record_wire_shape() {
        let json = serde_json::to_value(nyc()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "loc": [40.7127281, -74.0060152],
                "box": [[40.9175771, -73.7002721], [40.4773991, -74.2590899]]
            })
        );
    }

    #[test]
    fn test_record_map_keeps_order_and_empty_entries() {
        let raw = r#"{"Boston": {}, "Bronx county": {"loc": [1.0, 2.0], "box": [[3.0, 4.0], [0.5, 1.5]]}, "Albany": {}}"#;
        let map: RecordMap = serde_json::from_str(raw).unwrap();

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Boston", "Bronx county", "Albany"]);
        assert_eq!(map.get("Boston"), Some(None));
        assert_eq!(map.get("Queens county"), None);

        let bronx = map.get("Bronx county").flatten().unwrap();
        assert_eq!(bronx.bbox.ne, LatLon::new(3.0, 4.0));
        assert_eq!(bronx.bbox.sw, LatLon::new(0.5, 1.5));

        let back = serde_json::to_string(&map).unwrap();
        assert!(back.starts_with(r#"{"Boston":{},"Bronx county""#));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = RecordMap::new();
        map.insert("a", None);
        map.insert("b", None);
        map.insert("a", Some(nyc()));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().next(), Some("a"));
        assert!(map.get("a").flatten().is_some());
    }

    #[test]
    fn test_box_corners() {
        let b = BoundingBox::from_extent(10.0, 20.0, 12.0, 24.0);
        assert_eq!(b.se(), LatLon::new(10.0, 24.0));
        assert_eq!(b.nw(), LatLon::new(12.0, 20.0));
        assert_eq!(b.center(), LatLon::new(11.0, 22.0));
    }

    #[test]
    fn test_point_axis_order() {
        let p: geo_types::Point<f64> = LatLon::new(40.0, -74.0).into();
        assert_eq!(p.x(), -74.0);
        assert_eq!(p.y(), 40.0);
    }
}
