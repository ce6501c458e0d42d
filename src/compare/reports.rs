//! Box-identity and box-center reports across all providers.

use serde::Serialize;

use super::checks::{boxes_identical, location_is_box_center};
use crate::error::AlignError;
use crate::geodata::GeodataCollection;
use crate::models::LatLon;

/// Per provider: are the boxes of two places identical?
///
/// Useful when two boxes drawn on a map look like they coincide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxIdentityReport {
    pub place1: String,
    pub place2: String,
    /// `None` when either record is empty
    pub rows: Vec<(String, Option<bool>)>,
}

/// Location vs. box center for one provider and place
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterCheck {
    pub location: LatLon,
    pub box_center: LatLon,
    pub same: bool,
}

/// Places × providers grid of [`CenterCheck`]s
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterCheckReport {
    pub providers: Vec<String>,
    pub places: Vec<String>,
    /// `cells[place][provider]`; `None` where a provider has no record
    pub cells: Vec<Vec<Option<CenterCheck>>>,
}

pub fn box_identity_report(
    collection: &GeodataCollection,
    place1: &str,
    place2: &str,
    tolerance: f64,
) -> Result<BoxIdentityReport, AlignError> {
    let first = collection.result_set(place1)?;
    let second = collection.result_set(place2)?;

    let rows = first
        .iter()
        .map(|(provider, a)| {
            let same = match (a, second.get(provider)) {
                (Some(a), Some(b)) => Some(boxes_identical(a, b, tolerance)),
                _ => None,
            };
            (provider.to_string(), same)
        })
        .collect();

    Ok(BoxIdentityReport {
        place1: place1.to_string(),
        place2: place2.to_string(),
        rows,
    })
}

pub fn center_check_report(collection: &GeodataCollection, tolerance: f64) -> CenterCheckReport {
    let places = collection.all_places();

    let cells = places
        .iter()
        .map(|place| {
            collection
                .sets()
                .iter()
                .map(|set| {
                    set.get(place).flatten().map(|r| CenterCheck {
                        location: r.location.rounded(),
                        box_center: r.bbox.center().rounded(),
                        same: location_is_box_center(r, tolerance),
                    })
                })
                .collect()
        })
        .collect();

    CenterCheckReport {
        providers: collection.providers().map(|p| p.to_string()).collect(),
        places: places.into_iter().map(String::from).collect(),
        cells,
    }
}
