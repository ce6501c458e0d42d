//! Pairwise comparison of geocoder results.
//!
//! The engine computes geodesic distances between every pair of providers
//! for one place; the checks and reports answer yes/no questions about the
//! providers' bounding boxes.

mod checks;
mod engine;
mod heatmap;
mod reports;

pub use checks::{boxes_identical, location_is_box_center, CENTER_TOLERANCE};
pub use engine::{geodesic_km, ComparisonEngine, DEFAULT_PROVIDER_COUNT};
pub use heatmap::{HeatmapGrid, HeatmapPanel, HeatmapRow};
pub use reports::{
    box_identity_report, center_check_report, BoxIdentityReport, CenterCheck, CenterCheckReport,
};
