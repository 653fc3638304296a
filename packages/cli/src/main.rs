#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Headless dashboard runner for the collision map.
//!
//! Wires a [`Dashboard`] to terminal-backed collaborators: the map view
//! prints the rendered feature count, the KPI view prints the totals,
//! and the chart view prints one line per daily bucket. Useful for
//! exercising the filter pipeline against a live Socrata endpoint or a
//! `GeoJSON` snapshot without a browser.

mod views;

use chrono::NaiveDate;
use clap::Parser;
use collision_map_collision_models::SeverityFilter;
use collision_map_dashboard::Dashboard;
use collision_map_query::{BoundingBox, DateRange};
use collision_map_source::{CollisionSource, file::FileSource, socrata::SocrataSource};

use crate::views::{TermChart, TermKpis, TermMap};

/// Render a collision dataset through the dashboard filter pipeline.
#[derive(Debug, Parser)]
#[command(name = "collision_map_cli")]
struct Args {
    /// Path to a GeoJSON FeatureCollection snapshot.
    #[arg(long, conflicts_with = "url")]
    file: Option<std::path::PathBuf>,

    /// Socrata GeoJSON resource URL (e.g. the SDOT collisions dataset).
    #[arg(long)]
    url: Option<String>,

    /// Start of the date window (YYYY-MM-DD). Defaults to 30 days ago.
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// End of the date window (YYYY-MM-DD), inclusive.
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// Drop the date window entirely.
    #[arg(long, conflicts_with_all = ["start", "end"])]
    all_dates: bool,

    /// Severity code to match, or ALL.
    #[arg(long, default_value = "ALL")]
    severity: String,

    /// Viewport bounding box as west,south,east,north.
    #[arg(long)]
    bbox: Option<String>,

    /// Let records with no parsable date pass the date filter (the
    /// legacy dashboard behavior).
    #[arg(long)]
    missing_date_passes: bool,
}

/// Parses a `"west,south,east,north"` bounding box argument.
fn parse_bbox(s: &str) -> Option<BoundingBox> {
    let parts: Vec<f64> = s.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if parts.len() == 4 {
        Some(BoundingBox::new(parts[0], parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let args = Args::parse();
    log::debug!("Parsed args: {args:?}");

    let severity = SeverityFilter::from_selection(&args.severity);
    let date_range = match (args.start, args.end) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
        _ => None,
    };

    let source: Box<dyn CollisionSource> = if let Some(path) = &args.file {
        Box::new(FileSource::new(path))
    } else if let Some(url) = &args.url {
        let mut socrata = SocrataSource::new(url).with_severity(severity.clone());
        if let Some(range) = date_range {
            socrata = socrata.with_date_range(range.start, range.end);
        }
        Box::new(socrata)
    } else {
        return Err("one of --file or --url is required".into());
    };

    let viewport = match args.bbox.as_deref() {
        Some(s) => Some(parse_bbox(s).ok_or("invalid --bbox, expected west,south,east,north")?),
        None => None,
    };

    let mut dashboard = Dashboard::new(
        source,
        Box::new(TermMap::new(viewport)),
        Box::new(TermChart),
        Box::new(TermKpis),
    );

    dashboard.set_missing_date_passes(args.missing_date_passes);
    if args.all_dates {
        dashboard.set_date_range(None);
    } else if let Some(range) = date_range {
        dashboard.set_date_range(Some(range));
    }
    dashboard.set_severity(severity);

    dashboard.load().await?;

    if viewport.is_some() {
        dashboard.on_viewport_changed();
    }

    Ok(())
}
