//! Human-facing renderings of comparison results.
//!
//! Nothing here modifies the structures it is given.

pub mod html;
pub mod map;
pub mod table;

pub use html::{
    as_of, comparison_table_html, heatmap_html, write_comparison_tables, write_heatmap,
};
pub use map::{place_geojson, write_place_maps};
pub use table::{
    render_box_identity, render_center_checks, render_comparison, write_comparisons_csv,
    write_heatmap_csv,
};
