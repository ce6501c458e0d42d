//! Output of the pairwise comparison engine.

use std::fmt;

use serde::Serialize;

use super::units::{DistanceUnit, Units};

/// What a pairwise distance measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MetricKind {
    Location,
    #[serde(rename = "NE")]
    NeCorner,
    #[serde(rename = "SW")]
    SwCorner,
}

impl MetricKind {
    pub fn all() -> &'static [MetricKind] {
        &[MetricKind::Location, MetricKind::NeCorner, MetricKind::SwCorner]
    }

    /// Short column label
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Location => "Location",
            MetricKind::NeCorner => "NE",
            MetricKind::SwCorner => "SW",
        }
    }

    /// Long label for panel titles
    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::Location => "Location",
            MetricKind::NeCorner => "NE corner",
            MetricKind::SwCorner => "SW corner",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three distances of one pair, in one unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairDistances {
    pub location: f64,
    pub ne: f64,
    pub sw: f64,
}

impl PairDistances {
    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Location => self.location,
            MetricKind::NeCorner => self.ne,
            MetricKind::SwCorner => self.sw,
        }
    }
}

/// Distances between two providers' results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseEntry {
    pub first: String,
    pub second: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub km: Option<PairDistances>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mi: Option<PairDistances>,
}

impl PairwiseEntry {
    /// Pair label, e.g. "Nominatim v. GoogleV3"
    pub fn label(&self) -> String {
        format!("{} v. {}", self.first, self.second)
    }

    pub fn distances(&self, unit: DistanceUnit) -> Option<&PairDistances> {
        match unit {
            DistanceUnit::Km => self.km.as_ref(),
            DistanceUnit::Mi => self.mi.as_ref(),
        }
    }

    pub fn get(&self, unit: DistanceUnit, kind: MetricKind) -> Option<f64> {
        self.distances(unit).map(|d| d.get(kind))
    }
}

/// A value column of a comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub unit: DistanceUnit,
    pub kind: MetricKind,
}

impl Column {
    /// Flat key, e.g. "NE (km)"
    pub fn flat_label(&self) -> String {
        format!("{} ({})", self.kind.label(), self.unit)
    }

    /// Two-level key: ("(km)", "NE")
    pub fn nested_label(&self) -> (String, &'static str) {
        (format!("({})", self.unit), self.kind.label())
    }
}

/// Pairwise distances for every provider pair of one place.
///
/// Entries keep the enumeration order of the input providers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    pub place: String,
    pub units: Units,
    pub entries: Vec<PairwiseEntry>,
}

impl PairwiseComparison {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a pair in either order
    pub fn pair(&self, a: &str, b: &str) -> Option<&PairwiseEntry> {
        self.entries
            .iter()
            .find(|e| (e.first == a && e.second == b) || (e.first == b && e.second == a))
    }

    /// Columns grouped by metric, then unit: Location (km), Location (mi), NE (km), ...
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        for kind in MetricKind::all() {
            for unit in self.units.list() {
                columns.push(Column {
                    unit: *unit,
                    kind: *kind,
                });
            }
        }
        columns
    }

    /// Whether columns carry a two-level (unit, metric) key
    pub fn is_nested(&self) -> bool {
        self.units.is_nested()
    }

    /// All values of one column, in entry order
    pub fn column_values(&self, column: Column) -> Vec<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.get(column.unit, column.kind))
            .collect()
    }
}
