//! Geocompare - pairwise comparison of geocoding results
//!
//! Queries several geocoding services for the same places, caches their
//! normalized answers, and measures how far apart the returned locations and
//! bounding-box corners are on the WGS84 ellipsoid.

pub mod compare;
pub mod config;
pub mod error;
pub mod geodata;
pub mod models;
pub mod present;
pub mod providers;

pub use compare::{geodesic_km, ComparisonEngine};
pub use error::{AlignError, CompareError, FetchError};
pub use models::{
    BoundingBox, DistanceUnit, LatLon, NormalizedRecord, PairwiseComparison, PlaceResultSet,
    Units,
};
