//! Pivot of pairwise distances across places, for heatmap display.

use serde::Serialize;

use crate::geodata::PlaceComparison;
use crate::models::{DistanceUnit, MetricKind};

/// Distance (km) treated as the neutral midpoint of the color scale
const ACCEPTABLE_DIFFERENCE_KM: f64 = 5.0;

/// One pair/metric row across all places
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub pair: String,
    pub second: String,
    pub kind: MetricKind,
    /// One value per place; `None` where the unit was not computed
    pub values: Vec<Option<f64>>,
}

impl HeatmapRow {
    /// Row key, e.g. "Nominatim v. GoogleV3|NE"
    pub fn key(&self) -> String {
        format!("{}|{}", self.pair, self.kind)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HeatmapPanel<'a> {
    pub kind: MetricKind,
    pub rows: &'a [HeatmapRow],
}

/// Rows are pair|metric, sorted by metric then by the pair's second
/// provider; columns are places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub unit: DistanceUnit,
    pub places: Vec<String>,
    pub rows: Vec<HeatmapRow>,
}

impl HeatmapGrid {
    pub fn build(comparisons: &[PlaceComparison], unit: DistanceUnit) -> Self {
        let places: Vec<String> = comparisons
            .iter()
            .map(|c| c.distances.place.clone())
            .collect();

        let mut rows: Vec<HeatmapRow> = Vec::new();
        for (col, cmp) in comparisons.iter().enumerate() {
            for entry in &cmp.distances.entries {
                let pair = entry.label();
                for kind in MetricKind::all() {
                    let idx = match rows.iter().position(|r| r.pair == pair && r.kind == *kind) {
                        Some(i) => i,
                        None => {
                            rows.push(HeatmapRow {
                                pair: pair.clone(),
                                second: entry.second.clone(),
                                kind: *kind,
                                values: vec![None; comparisons.len()],
                            });
                            rows.len() - 1
                        }
                    };
                    rows[idx].values[col] = entry.get(unit, *kind);
                }
            }
        }

        // stable: pairs sharing a second provider keep enumeration order
        rows.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.second.cmp(&b.second)));

        Self {
            unit,
            places,
            rows,
        }
    }

    /// Location, NE corner and SW corner panels
    pub fn panels(&self) -> Vec<HeatmapPanel<'_>> {
        MetricKind::all()
            .iter()
            .map(|kind| {
                let start = self.rows.partition_point(|r| r.kind < *kind);
                let end = self.rows.partition_point(|r| r.kind <= *kind);
                HeatmapPanel {
                    kind: *kind,
                    rows: &self.rows[start..end],
                }
            })
            .collect()
    }

    /// Midpoint of the color scale in this grid's unit
    pub fn center(&self) -> f64 {
        match self.unit {
            DistanceUnit::Km => ACCEPTABLE_DIFFERENCE_KM,
            DistanceUnit::Mi => ACCEPTABLE_DIFFERENCE_KM * 0.62,
        }
    }

    /// Diverging blue-white-red color for a distance, centered on [`Self::center`]
    pub fn color(&self, value: f64) -> String {
        const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
        const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
        const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

        let t = (value / (2.0 * self.center())).clamp(0.0, 1.0);
        let (from, to, f) = if t < 0.5 {
            (COOL, MID, t * 2.0)
        } else {
            (MID, WARM, (t - 0.5) * 2.0)
        };
        let mix = |a: f64, b: f64| (a + (b - a) * f).round() as u8;

        format!(
            "#{:02x}{:02x}{:02x}",
            mix(from.0, to.0),
            mix(from.1, to.1),
            mix(from.2, to.2)
        )
    }
}
