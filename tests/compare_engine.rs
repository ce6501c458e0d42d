use geocompare::compare::{boxes_identical, location_is_box_center, ComparisonEngine, CENTER_TOLERANCE};
use geocompare::error::CompareError;
use geocompare::models::{
    BoundingBox, DistanceUnit, LatLon, MetricKind, NormalizedRecord, PlaceResultSet, Units,
};

const PROVIDERS: [&str; 4] = ["Nominatim", "GoogleV3", "ArcGis", "AzureMaps"];

fn record(lat: f64, lon: f64) -> NormalizedRecord {
    NormalizedRecord::new(
        LatLon::new(lat, lon),
        BoundingBox::from_extent(lat - 0.2, lon - 0.25, lat + 0.2, lon + 0.25),
    )
}

fn new_york_city() -> PlaceResultSet {
    let locations = [
        (40.7128, -74.0060),
        (40.7127, -74.0061),
        (40.7130, -74.0058),
        (40.7128, -74.0060),
    ];
    PROVIDERS
        .iter()
        .zip(locations)
        .fold(PlaceResultSet::new("New York City"), |set, (p, (lat, lon))| {
            set.with(*p, Some(record(lat, lon)))
        })
}

#[test]
fn test_new_york_city_scenario() {
    let cmp = ComparisonEngine::default()
        .compare(&new_york_city(), Units::Both)
        .unwrap();

    assert_eq!(cmp.len(), 6);
    let p1_p4 = cmp.pair("Nominatim", "AzureMaps").unwrap();
    for unit in [DistanceUnit::Km, DistanceUnit::Mi] {
        for kind in MetricKind::all() {
            assert_eq!(p1_p4.get(unit, *kind), Some(0.0));
        }
    }

    for entry in cmp.entries.iter().filter(|e| e.label() != "Nominatim v. AzureMaps") {
        let km = entry.km.unwrap().location;
        let mi = entry.mi.unwrap().location;
        assert!(km > 0.0 && km < 0.1, "{}: {}", entry.label(), km);
        assert!((mi - 0.621371 * km).abs() < 1e-5, "{}: {} mi vs {} km", entry.label(), mi, km);
    }
}

#[test]
fn test_distances_are_symmetric() {
    let a = record(40.7128, -74.0060);
    let b = record(42.3601, -71.0589);
    let engine = ComparisonEngine::new(2);

    let ab = engine
        .compare(&PlaceResultSet::new("x").with("A", Some(a)).with("B", Some(b)), Units::Km)
        .unwrap();
    let ba = engine
        .compare(&PlaceResultSet::new("x").with("B", Some(b)).with("A", Some(a)), Units::Km)
        .unwrap();

    let ab = ab.entries[0].km.unwrap();
    let ba = ba.entries[0].km.unwrap();
    for kind in MetricKind::all() {
        assert!((ab.get(*kind) - ba.get(*kind)).abs() < 1e-6);
    }
    assert!(ab.location > 300.0 && ab.location < 310.0, "{}", ab.location);
}

#[test]
fn test_identical_records_have_zero_distance() {
    let r = record(-33.8688, 151.2093);
    let cmp = ComparisonEngine::new(2)
        .compare(
            &PlaceResultSet::new("Sydney").with("A", Some(r)).with("B", Some(r)),
            Units::Both,
        )
        .unwrap();
    let entry = &cmp.entries[0];
    assert_eq!(entry.km.unwrap().location, 0.0);
    assert_eq!(entry.mi.unwrap().sw, 0.0);
}

#[test]
fn test_pair_count_is_n_choose_2() {
    for n in 1..=6usize {
        let set = (0..n).fold(PlaceResultSet::new("grid"), |set, i| {
            set.with(format!("P{}", i), Some(record(10.0 + i as f64 * 0.01, 20.0)))
        });
        let cmp = ComparisonEngine::new(n).compare(&set, Units::Km).unwrap();
        assert_eq!(cmp.len(), n * (n - 1) / 2);
    }
}

#[test]
fn test_km_to_mi_ratio() {
    let set = PlaceResultSet::new("far apart")
        .with("A", Some(record(51.5074, -0.1278)))
        .with("B", Some(record(48.8566, 2.3522)))
        .with("C", Some(record(52.5200, 13.4050)));
    let cmp = ComparisonEngine::new(3).compare(&set, Units::Both).unwrap();

    for entry in &cmp.entries {
        let km = entry.km.unwrap();
        let mi = entry.mi.unwrap();
        for kind in MetricKind::all() {
            let ratio = km.get(*kind) / mi.get(*kind);
            assert!((ratio - 1.60934).abs() < 1e-4, "{} {}: {}", entry.label(), kind, ratio);
        }
    }
}

#[test]
fn test_single_unit_gives_flat_columns() {
    let cmp = ComparisonEngine::default()
        .compare(&new_york_city(), Units::Mi)
        .unwrap();
    assert!(!cmp.is_nested());
    assert!(cmp.entries.iter().all(|e| e.km.is_none() && e.mi.is_some()));
    let labels: Vec<String> = cmp.columns().iter().map(|c| c.flat_label()).collect();
    assert_eq!(labels, vec!["Location (mi)", "NE (mi)", "SW (mi)"]);
}

#[test]
fn test_three_entries_when_four_expected() {
    let mut set = PlaceResultSet::new("New York City");
    for p in &PROVIDERS[..3] {
        set.insert(*p, Some(record(40.7128, -74.0060)));
    }
    assert_eq!(
        ComparisonEngine::default().compare(&set, Units::Km),
        Err(CompareError::ShapeMismatch {
            expected: 4,
            actual: 3
        })
    );
}

#[test]
fn test_failed_geocode_names_provider() {
    let set = new_york_city().with("ArcGis", None);
    match ComparisonEngine::default().compare(&set, Units::Km) {
        Err(CompareError::MissingLocation { provider, place }) => {
            assert_eq!(provider, "ArcGis");
            assert_eq!(place, "New York City");
        }
        other => panic!("expected a missing location, got {:?}", other),
    }
}

#[test]
fn test_invalid_units() {
    assert!(matches!("km,ft".parse::<Units>(), Err(CompareError::InvalidUnits(_))));
    assert_eq!(Units::from_names::<&str>(&[]), Ok(Units::Km));
    assert_eq!("mi,km".parse::<Units>(), Ok(Units::Both));
}

#[test]
fn test_boxes_identical() {
    let a = record(40.0, -74.0);
    let mut b = a;
    assert!(boxes_identical(&a, &b, 0.0));

    b.bbox.sw.lon += 1e-4;
    assert!(!boxes_identical(&a, &b, 0.0));
    assert!(!boxes_identical(&a, &b, 1e-5));
    assert!(boxes_identical(&a, &b, 1e-3));
}

#[test]
fn test_location_is_box_center() {
    let centered = record(40.7128, -74.0060);
    assert!(location_is_box_center(&centered, CENTER_TOLERANCE));

    let mut offset = centered;
    offset.location.lat += 1e-4;
    assert!(!location_is_box_center(&offset, CENTER_TOLERANCE));
}
