//! Command line entry point.
//!
//! Loads (or fetches) provider results and prints or writes comparisons.

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geocompare::compare::{
    box_identity_report, center_check_report, ComparisonEngine, HeatmapGrid, CENTER_TOLERANCE,
};
use geocompare::config::Config;
use geocompare::geodata::{GeodataCollection, GeodataStore, LoadPolicy, PlaceQuery};
use geocompare::models::Units;
use geocompare::present;

#[derive(Parser, Debug)]
#[command(name = "geocompare")]
#[command(about = "Compare geocoding providers by geodesic distance")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Distance units, comma separated: km, mi or km,mi
    #[arg(short, long)]
    units: Option<Units>,

    /// Read only the `<prefix>_geodata_*.json` cache files
    #[arg(long, conflicts_with = "refresh")]
    prefix: Option<String>,

    /// Ignore cached results and query every provider again
    #[arg(long)]
    refresh: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load or fetch results for every configured provider and write the caches
    Fetch,
    /// Print pairwise distance tables
    Compare {
        /// Only this place
        #[arg(long)]
        place: Option<String>,

        /// Also write the tables as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Report, per provider, whether two places share a bounding box
    Boxes { place1: String, place2: String },
    /// Report whether each location is the center of its box
    Centers {
        /// Show the rounded location and box center
        #[arg(long)]
        values: bool,
    },
    /// Write HTML tables, heatmaps and GeoJSON maps
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("geocompare=info"))
    };
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    dotenvy::dotenv().ok();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    let units = args.units.unwrap_or(config.units);

    let policy = match (&args.prefix, args.refresh) {
        (Some(prefix), _) => LoadPolicy::Prefixed(prefix.clone()),
        (None, true) => LoadPolicy::Refresh,
        (None, false) => LoadPolicy::PreferCache,
    };

    let store = GeodataStore::new(&config, config.keys.resolve())?;
    let queries = PlaceQuery::parse_all(&config.queries);
    let collection = store
        .load_all(&config.providers, &queries, &policy)
        .await
        .context("Failed to load geodata")?;

    let engine = ComparisonEngine::new(config.provider_count);

    match args.command {
        Command::Fetch => {
            info!(
                "{} places cached for {} providers in {}",
                collection.places().len(),
                collection.len(),
                store.geodata_dir().display()
            );
        }
        Command::Compare { place, csv } => {
            let comparisons = match place {
                Some(place) => vec![collection.compare_place(&engine, &place, units)?],
                None => collection.compare_all(&engine, units),
            };
            for cmp in &comparisons {
                println!("{}", present::render_comparison(&cmp.distances));
            }
            if let Some(path) = csv {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                present::write_comparisons_csv(file, &comparisons)?;
                info!("Comparisons saved to {}", path.display());
            }
        }
        Command::Boxes { place1, place2 } => {
            let report = box_identity_report(&collection, &place1, &place2, 0.0)?;
            print!("{}", present::render_box_identity(&report));
        }
        Command::Centers { values } => {
            let report = center_check_report(&collection, CENTER_TOLERANCE);
            print!("{}", present::render_center_checks(&report, values));
        }
        Command::Report => write_report(&config, &collection, &engine, units)?,
    }

    Ok(())
}

fn write_report(
    config: &Config,
    collection: &GeodataCollection,
    engine: &ComparisonEngine,
    units: Units,
) -> Result<()> {
    let comparisons = collection.compare_all(engine, units);
    info!("Report {} for {} places", present::as_of(), comparisons.len());

    present::write_comparison_tables(&config.dirs.html, &comparisons)?;

    let results: Vec<_> = comparisons.iter().map(|c| &c.results).collect();
    present::write_place_maps(&config.dirs.html, &results)?;

    fs::create_dir_all(&config.dirs.report)
        .with_context(|| format!("Failed to create {}", config.dirs.report.display()))?;

    for unit in units.list() {
        let grid = HeatmapGrid::build(&comparisons, *unit);
        present::write_heatmap(&config.dirs.images, &grid)?;

        let path = config
            .dirs
            .report
            .join(format!("Heatmap_geodist_difference_{}.csv", unit));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        present::write_heatmap_csv(file, &grid)?;
    }

    let path = config.dirs.report.join("geodist_differences.csv");
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    present::write_comparisons_csv(file, &comparisons)?;

    info!("Report written");
    Ok(())
}
