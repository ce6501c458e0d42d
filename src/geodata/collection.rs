//! Per-place views across all providers.

use tracing::warn;

use super::cache::ProviderGeodata;
use crate::compare::ComparisonEngine;
use crate::error::{AlignError, PlaceError};
use crate::models::{PairwiseComparison, PlaceResultSet, Units};
use crate::providers::ProviderKind;

/// Provider results side by side, in configured provider order
#[derive(Debug, Clone, Default)]
pub struct GeodataCollection {
    sets: Vec<ProviderGeodata>,
}

/// Input and output of one engine call
#[derive(Debug, Clone)]
pub struct PlaceComparison {
    pub results: PlaceResultSet,
    pub distances: PairwiseComparison,
}

impl GeodataCollection {
    pub fn new(sets: Vec<ProviderGeodata>) -> Self {
        Self { sets }
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.sets.iter().map(|s| s.provider)
    }

    pub fn sets(&self) -> &[ProviderGeodata] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Places known to every provider, in the first provider's order
    pub fn places(&self) -> Vec<&str> {
        let Some(first) = self.sets.first() else {
            return Vec::new();
        };
        first
            .places
            .keys()
            .filter(|p| self.sets.iter().all(|s| s.places.contains_key(p)))
            .collect()
    }

    /// Every place known to any provider, in first-seen order
    pub fn all_places(&self) -> Vec<&str> {
        let mut places: Vec<&str> = Vec::new();
        for set in &self.sets {
            for p in set.places.keys() {
                if !places.contains(&p) {
                    places.push(p);
                }
            }
        }
        places
    }

    /// Gather every provider's record for `place`.
    ///
    /// Fails if any provider has no entry under that key, so unrelated
    /// records are never compared by accident. Empty records (failed
    /// geocodes) are kept; the engine reports them.
    pub fn result_set(&self, place: &str) -> Result<PlaceResultSet, AlignError> {
        let missing: Vec<String> = self
            .sets
            .iter()
            .filter(|s| !s.places.contains_key(place))
            .map(|s| s.provider.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AlignError::PlaceMissing {
                place: place.to_string(),
                providers: missing,
            });
        }

        let mut set = PlaceResultSet::new(place);
        for s in &self.sets {
            set.insert(s.provider.name(), s.get(place).flatten().copied());
        }
        Ok(set)
    }

    pub fn compare_place(
        &self,
        engine: &ComparisonEngine,
        place: &str,
        units: Units,
    ) -> Result<PlaceComparison, PlaceError> {
        let results = self.result_set(place)?;
        let distances = engine.compare(&results, units)?;
        Ok(PlaceComparison { results, distances })
    }

    /// Compare every shared place, logging and skipping the ones that fail
    pub fn compare_all(&self, engine: &ComparisonEngine, units: Units) -> Vec<PlaceComparison> {
        self.all_places()
            .into_iter()
            .filter_map(|place| match self.compare_place(engine, place, units) {
                Ok(c) => Some(c),
                Err(e) => {
                    warn!("Skipping '{}': {}", place, e);
                    None
                }
            })
            .collect()
    }
}
