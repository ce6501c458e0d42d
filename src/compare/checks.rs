//! Self-consistency checks on bounding boxes.

use crate::models::NormalizedRecord;

/// Default tolerance for [`location_is_box_center`], in degrees
pub const CENTER_TOLERANCE: f64 = 1e-6;

/// True if all four corner coordinates of both boxes agree within `tolerance`
/// (absolute difference per coordinate).
pub fn boxes_identical(a: &NormalizedRecord, b: &NormalizedRecord, tolerance: f64) -> bool {
    a.bbox
        .coordinates()
        .iter()
        .zip(b.bbox.coordinates().iter())
        .all(|(x, y)| (x - y).abs() <= tolerance)
}

/// True if the reported location is the flat midpoint of the record's own box.
///
/// Both points are rounded to 6 decimals before the per-coordinate comparison.
/// The midpoint is a plain average of the corners, not a geodesic one.
pub fn location_is_box_center(record: &NormalizedRecord, tolerance: f64) -> bool {
    let center = record.bbox.center();
    let loc = record.location;

    micro_diff(loc.lat, center.lat) <= tolerance && micro_diff(loc.lon, center.lon) <= tolerance
}

// Difference of two values after rounding each to 6 decimals, computed in
// whole micro-degrees so that one rounding step compares equal to 1e-6.
fn micro_diff(a: f64, b: f64) -> f64 {
    ((a * 1e6).round() - (b * 1e6).round()).abs() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, LatLon};

    fn boxed(ne: (f64, f64), sw: (f64, f64)) -> NormalizedRecord {
        NormalizedRecord::new(
            LatLon::new((ne.0 + sw.0) / 2.0, (ne.1 + sw.1) / 2.0),
            BoundingBox::new(LatLon::new(ne.0, ne.1), LatLon::new(sw.0, sw.1)),
        )
    }

    #[test]
    fn test_identical_boxes() {
        let a = boxed((40.917577, -73.700272), (40.477399, -74.25909));
        let b = boxed((40.917577, -73.700272), (40.477399, -74.25909));
        assert!(boxes_identical(&a, &b, 0.0));
    }

    #[test]
    fn test_single_coordinate_difference() {
        let a = boxed((40.917577, -73.700272), (40.477399, -74.25909));
        let b = boxed((40.917577, -73.700272), (40.477399, -74.26909));
        assert!(!boxes_identical(&a, &b, 0.0));
        assert!(!boxes_identical(&a, &b, 0.001));
        assert!(boxes_identical(&a, &b, 0.02));
    }

    #[test]
    fn test_location_at_box_center() {
        let r = boxed((42.4, -70.9), (42.2, -71.2));
        assert!(location_is_box_center(&r, CENTER_TOLERANCE));
    }

    #[test]
    fn test_location_off_center() {
        let mut r = boxed((42.4, -70.9), (42.2, -71.2));
        r.location.lon += 0.00001;
        assert!(!location_is_box_center(&r, CENTER_TOLERANCE));
        assert!(location_is_box_center(&r, 0.0001));
    }

    #[test]
    fn test_one_micro_degree_is_within_default_tolerance() {
        let mut r = boxed((42.4, -70.9), (42.2, -71.2));
        r.location.lat += 0.000001;
        assert!(location_is_box_center(&r, CENTER_TOLERANCE));
    }
}
