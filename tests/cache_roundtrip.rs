use std::fs;

use geocompare::geodata::{cache_file_name, read_cache, write_cache, GeodataCollection, ProviderGeodata};
use geocompare::models::{BoundingBox, LatLon, NormalizedRecord};
use geocompare::providers::ProviderKind;

fn awkward_record() -> NormalizedRecord {
    // values without a short decimal representation
    NormalizedRecord::new(
        LatLon::new(40.712775599999996, -74.00597309999999),
        BoundingBox::new(
            LatLon::new(0.1 + 0.2, -73.70027209999999),
            LatLon::new(40.4773991, -1.0 / 3.0),
        ),
    )
}

#[test]
fn test_coordinates_survive_roundtrip_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(cache_file_name(ProviderKind::GoogleV3, None));

    let mut data = ProviderGeodata::new(ProviderKind::GoogleV3);
    data.insert("New York City", Some(awkward_record()));
    data.insert("Richmond county", None);
    data.insert("Boston", Some(awkward_record()));
    write_cache(&path, &data).unwrap();

    let loaded = read_cache(&path, ProviderKind::GoogleV3).unwrap().unwrap();
    assert_eq!(loaded, data);

    let before = awkward_record();
    let after = loaded.get("New York City").flatten().unwrap();
    assert_eq!(after.location.lat.to_bits(), before.location.lat.to_bits());
    assert_eq!(after.location.lon.to_bits(), before.location.lon.to_bits());
    for (a, b) in after.bbox.coordinates().iter().zip(before.bbox.coordinates()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    let keys: Vec<&str> = loaded.places.keys().collect();
    assert_eq!(keys, vec!["New York City", "Richmond county", "Boston"]);
}

#[test]
fn test_cache_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join(cache_file_name(ProviderKind::Nominatim, Some("v2")));

    let mut data = ProviderGeodata::new(ProviderKind::Nominatim);
    data.insert(
        "Boston",
        Some(NormalizedRecord::new(
            LatLon::new(42.5, -71.0),
            BoundingBox::new(LatLon::new(43.0, -70.5), LatLon::new(42.0, -71.5)),
        )),
    );
    data.insert("Queens county", None);
    write_cache(&path, &data).unwrap();

    assert!(path.ends_with("v2_geodata_Nom.json"));
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        r#"{"Boston":{"loc":[42.5,-71.0],"box":[[43.0,-70.5],[42.0,-71.5]]},"Queens county":{}}"#
    );
}

#[test]
fn test_missing_file_and_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_cache(&dir.path().join("geodata_Arc.json"), ProviderKind::ArcGis)
        .unwrap()
        .is_none());

    let txt = dir.path().join("geodata_Arc.txt");
    fs::write(&txt, "{}").unwrap();
    assert!(read_cache(&txt, ProviderKind::ArcGis).is_err());
}

#[test]
fn test_collection_alignment() {
    let mut nom = ProviderGeodata::new(ProviderKind::Nominatim);
    nom.insert("Boston", Some(awkward_record()));
    nom.insert("Bronx county", Some(awkward_record()));

    let mut arc = ProviderGeodata::new(ProviderKind::ArcGis);
    arc.insert("Bronx county", Some(awkward_record()));

    let collection = GeodataCollection::new(vec![nom, arc]);
    assert_eq!(collection.places(), vec!["Bronx county"]);
    assert_eq!(collection.all_places(), vec!["Boston", "Bronx county"]);

    let err = collection.result_set("Boston").unwrap_err();
    assert_eq!(
        err.to_string(),
        "place 'Boston' is missing from the results of: ArcGis"
    );
    assert_eq!(collection.result_set("Bronx county").unwrap().len(), 2);
}
