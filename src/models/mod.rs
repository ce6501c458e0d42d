//! Core data models for the geocoder comparison.

pub mod comparison;
pub mod record;
pub mod units;

pub use comparison::{Column, MetricKind, PairDistances, PairwiseComparison, PairwiseEntry};
pub use record::{round6, BoundingBox, LatLon, NormalizedRecord, PlaceResultSet, RecordMap};
pub use units::{DistanceUnit, Units};
