//! Styled HTML tables and heatmaps.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::compare::HeatmapGrid;
use crate::geodata::PlaceComparison;
use crate::models::{Column, PairwiseComparison};

const MIN_COLOR: &str = "palegreen";
const MAX_COLOR: &str = "lightpink";

const TABLE_STYLE: &str = "table.geocompare { border-collapse: collapse; font-family: sans-serif; font-size: 0.9em; }\n\
table.geocompare caption { caption-side: top; font-weight: bold; padding: 0.4em; }\n\
table.geocompare th, table.geocompare td { border: 1px solid #ccc; padding: 0.2em 0.6em; }\n\
table.geocompare td { text-align: right; }\n";

/// "as of Oct 2026"
pub fn as_of() -> String {
    as_of_date(&Local::now())
}

fn as_of_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("as of {}", date.format("%b %Y"))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Extreme values of a column; `None` when the column is empty or constant
fn extremes(cmp: &PairwiseComparison, column: Column) -> Option<(f64, f64)> {
    let values = cmp.column_values(column);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min.is_finite() && max > min).then_some((min, max))
}

/// Table for one place with the minimum and maximum of each column highlighted
pub fn comparison_table_html(cmp: &PairwiseComparison, table_number: usize) -> String {
    let columns = cmp.columns();
    let bounds: Vec<Option<(f64, f64)>> = columns.iter().map(|c| extremes(cmp, *c)).collect();

    let mut html = String::new();
    let _ = writeln!(html, "<style>\n{}</style>", TABLE_STYLE);
    html.push_str("<table class=\"geocompare\">\n");
    let _ = writeln!(
        html,
        "<caption>Table 3.{}: Coordinates differences for location and box corners [{}]</caption>",
        table_number,
        escape(&cmp.place)
    );

    html.push_str("<thead>\n");
    if cmp.is_nested() {
        html.push_str("<tr><th></th>");
        for c in &columns {
            let _ = write!(html, "<th>{}</th>", c.nested_label().0);
        }
        html.push_str("</tr>\n<tr><th></th>");
        for c in &columns {
            let _ = write!(html, "<th>{}</th>", c.nested_label().1);
        }
    } else {
        html.push_str("<tr><th></th>");
        for c in &columns {
            let _ = write!(html, "<th>{}</th>", escape(&c.flat_label()));
        }
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for entry in &cmp.entries {
        let _ = write!(html, "<tr><th>{}</th>", escape(&entry.label()));
        for (c, bound) in columns.iter().zip(&bounds) {
            let Some(value) = entry.get(c.unit, c.kind) else {
                html.push_str("<td></td>");
                continue;
            };
            let background = match bound {
                Some((min, _)) if value == *min => Some(MIN_COLOR),
                Some((_, max)) if value == *max => Some(MAX_COLOR),
                _ => None,
            };
            match background {
                Some(color) => {
                    let _ = write!(html, "<td style=\"background-color: {}\">{:.6}</td>", color, value);
                }
                None => {
                    let _ = write!(html, "<td>{:.6}</td>", value);
                }
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    let _ = writeln!(html, "<p class=\"geocompare-stamp\">{}</p>", as_of());
    html
}

/// `<dir>/<place_with_underscores>_dist_diff.html` for every comparison; returns the paths written
pub fn write_comparison_tables(dir: &Path, comparisons: &[PlaceComparison]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(comparisons.len());
    for (i, cmp) in comparisons.iter().enumerate() {
        let path = dir.join(format!(
            "{}_dist_diff.html",
            cmp.distances.place.replace(' ', "_")
        ));
        fs::write(&path, comparison_table_html(&cmp.distances, i + 1))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    info!("Wrote {} comparison tables to {}", written.len(), dir.display());
    Ok(written)
}

/// Three heatmap panels (location, NE corner, SW corner) as colored tables
pub fn heatmap_html(grid: &HeatmapGrid) -> String {
    let unit = grid.unit;
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>Geodesic distance differences ({})</title>", unit);
    let _ = writeln!(html, "<style>\n{}</style>\n</head>\n<body>", TABLE_STYLE);
    let _ = writeln!(
        html,
        "<h2>Geodesic distance differences between providers ({}), {}</h2>",
        unit,
        as_of()
    );
    let _ = writeln!(
        html,
        "<p>Color scale centered at {:.2} {}.</p>",
        grid.center(),
        unit
    );

    for panel in grid.panels() {
        html.push_str("<table class=\"geocompare\">\n");
        let _ = writeln!(html, "<caption>{}</caption>", panel.kind.title());
        html.push_str("<tr><th></th>");
        for place in &grid.places {
            let _ = write!(html, "<th>{}</th>", escape(place));
        }
        html.push_str("</tr>\n");

        for row in panel.rows {
            let _ = write!(html, "<tr><th>{}</th>", escape(&row.pair));
            for value in &row.values {
                match value {
                    Some(v) => {
                        let _ = write!(
                            html,
                            "<td style=\"background-color: {}\">{:.1}</td>",
                            grid.color(*v),
                            v
                        );
                    }
                    None => html.push_str("<td></td>"),
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n<br>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// `<dir>/Heatmap_geodist_difference_<unit>.html`
pub fn write_heatmap(dir: &Path, grid: &HeatmapGrid) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(format!("Heatmap_geodist_difference_{}.html", grid.unit));
    fs::write(&path, heatmap_html(grid))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Heatmap saved to {}", path.display());
    Ok(path)
}
