//! Pairwise geodesic-distance comparison engine.

use geo::{Distance, Geodesic};
use tracing::debug;

use crate::error::CompareError;
use crate::models::{
    round6, DistanceUnit, LatLon, NormalizedRecord, PairDistances, PairwiseComparison,
    PairwiseEntry, PlaceResultSet, Units,
};

/// Number of providers compared unless configured otherwise
pub const DEFAULT_PROVIDER_COUNT: usize = 4;

/// Geodesic distance on the WGS84 ellipsoid, in kilometres
pub fn geodesic_km(a: LatLon, b: LatLon) -> f64 {
    if a == b {
        return 0.0;
    }
    Geodesic.distance(a.into(), b.into()) / 1000.0
}

/// Compares the results of exactly `provider_count` providers for one place.
///
/// Stateless apart from the expected provider count; safe to share across
/// threads.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonEngine {
    provider_count: usize,
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER_COUNT)
    }
}

impl ComparisonEngine {
    pub fn new(provider_count: usize) -> Self {
        Self { provider_count }
    }

    pub fn provider_count(&self) -> usize {
        self.provider_count
    }

    /// Compute location, NE-corner and SW-corner distances for every
    /// unordered provider pair, in input order, rounded to 6 decimals.
    pub fn compare(
        &self,
        results: &PlaceResultSet,
        units: Units,
    ) -> Result<PairwiseComparison, CompareError> {
        if results.len() != self.provider_count {
            return Err(CompareError::ShapeMismatch {
                expected: self.provider_count,
                actual: results.len(),
            });
        }

        let records: Vec<(&str, &NormalizedRecord)> = results
            .iter()
            .map(|(provider, record)| {
                record
                    .map(|r| (provider, r))
                    .ok_or_else(|| CompareError::MissingLocation {
                        provider: provider.to_string(),
                        place: results.place().to_string(),
                    })
            })
            .collect::<Result<_, _>>()?;

        let mut entries = Vec::with_capacity(records.len() * records.len().saturating_sub(1) / 2);

        for (i, (first, a)) in records.iter().enumerate() {
            for (second, b) in &records[i + 1..] {
                let km = PairDistances {
                    location: geodesic_km(a.location, b.location),
                    ne: geodesic_km(a.bbox.ne, b.bbox.ne),
                    sw: geodesic_km(a.bbox.sw, b.bbox.sw),
                };

                entries.push(PairwiseEntry {
                    first: first.to_string(),
                    second: second.to_string(),
                    km: units
                        .contains(DistanceUnit::Km)
                        .then(|| in_unit(&km, DistanceUnit::Km)),
                    mi: units
                        .contains(DistanceUnit::Mi)
                        .then(|| in_unit(&km, DistanceUnit::Mi)),
                });
            }
        }

        debug!(
            "Compared {} providers for '{}': {} pairs",
            records.len(),
            results.place(),
            entries.len()
        );

        Ok(PairwiseComparison {
            place: results.place().to_string(),
            units,
            entries,
        })
    }
}

fn in_unit(km: &PairDistances, unit: DistanceUnit) -> PairDistances {
    PairDistances {
        location: round6(unit.from_km(km.location)),
        ne: round6(unit.from_km(km.ne)),
        sw: round6(unit.from_km(km.sw)),
    }
}
