//! Plain-text and CSV tables.

use std::fmt::Write as _;
use std::io;

use anyhow::Result;

use crate::compare::{BoxIdentityReport, CenterCheckReport, HeatmapGrid};
use crate::geodata::PlaceComparison;
use crate::models::PairwiseComparison;

/// Fixed-width table; nested (two-unit) comparisons get a unit header row
pub fn render_comparison(cmp: &PairwiseComparison) -> String {
    let columns = cmp.columns();
    let labels: Vec<String> = cmp.entries.iter().map(|e| e.label()).collect();
    let first_width = labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(cmp.place.len()))
        .max()
        .unwrap_or(0);

    let headers: Vec<String> = if cmp.is_nested() {
        columns.iter().map(|c| c.nested_label().1.to_string()).collect()
    } else {
        columns.iter().map(|c| c.flat_label()).collect()
    };
    let width = headers.iter().map(String::len).max().unwrap_or(0).max(12);

    let mut out = String::new();
    if cmp.is_nested() {
        let _ = write!(out, "{:first_width$}", "");
        for c in &columns {
            let _ = write!(out, "  {:>width$}", c.nested_label().0);
        }
        out.push('\n');
    }

    let _ = write!(out, "{:first_width$}", cmp.place);
    for h in &headers {
        let _ = write!(out, "  {:>width$}", h);
    }
    out.push('\n');

    for (entry, label) in cmp.entries.iter().zip(&labels) {
        let _ = write!(out, "{:first_width$}", label);
        for c in &columns {
            match entry.get(c.unit, c.kind) {
                Some(v) => {
                    let _ = write!(out, "  {:>width$.6}", v);
                }
                None => {
                    let _ = write!(out, "  {:>width$}", "-");
                }
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_box_identity(report: &BoxIdentityReport) -> String {
    let mut out = format!("{} & {}: Identical bounding boxes?\n", report.place1, report.place2);
    for (provider, same) in &report.rows {
        let answer = match same {
            Some(true) => "yes",
            Some(false) => "no",
            None => "n/a",
        };
        let _ = writeln!(out, "  {:<12} {}", provider, answer);
    }
    out
}

/// With `show_values`, each cell also shows the rounded location and box center
pub fn render_center_checks(report: &CenterCheckReport, show_values: bool) -> String {
    let place_width = report.places.iter().map(String::len).max().unwrap_or(0).max(24);
    let mut out = String::new();

    if show_values {
        out.push_str("Location is box center?\n");
        for (place, row) in report.places.iter().zip(&report.cells) {
            let _ = writeln!(out, "{}", place);
            for (provider, cell) in report.providers.iter().zip(row) {
                match cell {
                    Some(c) => {
                        let _ = writeln!(
                            out,
                            "  {:<12} location {:<26} box center {:<26} same? {}",
                            provider,
                            c.location.to_string(),
                            c.box_center.to_string(),
                            c.same
                        );
                    }
                    None => {
                        let _ = writeln!(out, "  {:<12} n/a", provider);
                    }
                }
            }
        }
        return out;
    }

    let _ = write!(out, "{:place_width$}", "Location is box center?");
    for provider in &report.providers {
        let _ = write!(out, "  {:>10}", provider);
    }
    out.push('\n');
    for (place, row) in report.places.iter().zip(&report.cells) {
        let _ = write!(out, "{:place_width$}", place);
        for cell in row {
            let text = cell.map_or("n/a".to_string(), |c| c.same.to_string());
            let _ = write!(out, "  {:>10}", text);
        }
        out.push('\n');
    }
    out
}

/// One row per place and pair; unit/metric columns as computed
pub fn write_comparisons_csv<W: io::Write>(writer: W, comparisons: &[PlaceComparison]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let Some(first) = comparisons.first() else {
        csv.flush()?;
        return Ok(());
    };
    let columns = first.distances.columns();

    let mut header = vec!["place".to_string(), "pair".to_string()];
    header.extend(columns.iter().map(|c| c.flat_label()));
    csv.write_record(&header)?;

    for cmp in comparisons {
        for entry in &cmp.distances.entries {
            let mut record = vec![cmp.distances.place.clone(), entry.label()];
            record.extend(columns.iter().map(|c| {
                entry
                    .get(c.unit, c.kind)
                    .map(|v| format!("{:.6}", v))
                    .unwrap_or_default()
            }));
            csv.write_record(&record)?;
        }
    }
    csv.flush()?;
    Ok(())
}

pub fn write_heatmap_csv<W: io::Write>(writer: W, grid: &HeatmapGrid) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![format!("geodesic difference ({})", grid.unit)];
    header.extend(grid.places.iter().cloned());
    csv.write_record(&header)?;

    for row in &grid.rows {
        let mut record = vec![row.key()];
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|v| format!("{:.6}", v)).unwrap_or_default()),
        );
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}
