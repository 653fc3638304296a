//! Terminal-backed dashboard collaborators.

use collision_map_dashboard::{ChartView, KpiView, MapView};
use collision_map_query::{BoundingBox, DailyBucket, Summary};
use collision_map_source_models::CollisionRecord;

/// Map stand-in: fixed viewport from the command line, prints the
/// rendered feature count per severity.
pub struct TermMap {
    viewport: Option<BoundingBox>,
}

impl TermMap {
    #[must_use]
    pub const fn new(viewport: Option<BoundingBox>) -> Self {
        Self { viewport }
    }
}

impl MapView for TermMap {
    fn set_records(&mut self, records: &[CollisionRecord]) {
        let mut by_severity: std::collections::BTreeMap<&str, usize> =
            std::collections::BTreeMap::new();
        for record in records {
            *by_severity.entry(record.severity.code()).or_insert(0) += 1;
        }
        println!("map: {} features", records.len());
        for (code, count) in by_severity {
            println!("  severity {code}: {count}");
        }
    }

    fn viewport(&self) -> Option<BoundingBox> {
        self.viewport
    }

    fn fly_to(&mut self, longitude: f64, latitude: f64, zoom: f64) {
        println!("map: recenter to ({longitude}, {latitude}) zoom {zoom}");
    }
}

/// Chart stand-in: one line per daily bucket.
pub struct TermChart;

impl ChartView for TermChart {
    fn set_series(&mut self, series: &[DailyBucket]) {
        println!("chart: {} days", series.len());
        for bucket in series {
            println!("  {}  {}", bucket.day, bucket.count);
        }
    }
}

/// KPI stand-in: prints the three totals.
pub struct TermKpis;

impl KpiView for TermKpis {
    fn set_summary(&mut self, summary: &Summary) {
        println!(
            "kpis: collisions={} injuries={} fatalities={}",
            summary.count, summary.total_injuries, summary.total_fatalities
        );
    }
}
