#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Dashboard controller for the collision map.
//!
//! [`Dashboard`] owns all mutable session state: the cached dataset
//! (immutable once loaded), the current [`FilterSpec`], and the map,
//! chart, and KPI collaborators consumed through narrow traits. Every
//! filter-affecting event recomputes the filtered set from the cache and
//! pushes the results synchronously to the collaborators; only [`load`]
//! touches the network.
//!
//! [`load`]: Dashboard::load

use chrono::{Days, NaiveDate};
use collision_map_collision_models::SeverityFilter;
use collision_map_query::{BoundingBox, DailyBucket, DateRange, FilterSpec, Summary};
use collision_map_source::{CollisionSource, SourceError, normalize::normalize_collection};
use collision_map_source_models::CollisionRecord;

/// Default map center (downtown Seattle), as `(longitude, latitude)`.
pub const DEFAULT_CENTER: (f64, f64) = (-122.335_167, 47.608_013);

/// Default map zoom level.
pub const DEFAULT_ZOOM: f64 = 11.0;

/// The default date window: the 30 days up to and including `today`.
#[must_use]
pub fn default_date_range(today: NaiveDate) -> DateRange {
    let start = today.checked_sub_days(Days::new(30)).unwrap_or(today);
    DateRange::new(start, today)
}

/// Errors that can occur while driving the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The dataset fetch failed; the render cycle was aborted and cached
    /// state left untouched.
    #[error("Dataset load failed: {0}")]
    Load(#[from] SourceError),
}

/// The map widget, consumed through its narrowest useful surface.
pub trait MapView {
    /// Replaces the set of rendered point features. Only records with a
    /// valid position are pushed here.
    fn set_records(&mut self, records: &[CollisionRecord]);

    /// Returns the current viewport bounding box, if the widget exposes
    /// one. `None` means the map does not constrain the filter.
    fn viewport(&self) -> Option<BoundingBox>;

    /// Recenters the map.
    fn fly_to(&mut self, longitude: f64, latitude: f64, zoom: f64);
}

/// The time-series chart widget.
pub trait ChartView {
    /// Replaces the chart's day/count series.
    fn set_series(&mut self, series: &[DailyBucket]);
}

/// The KPI panel.
pub trait KpiView {
    /// Replaces the displayed totals.
    fn set_summary(&mut self, summary: &Summary);
}

/// Session-lifetime controller: constructed at startup, populated on
/// fetch completion, mutated only by filter-change events, torn down
/// never.
pub struct Dashboard {
    source: Box<dyn CollisionSource>,
    client: reqwest::Client,
    map: Box<dyn MapView>,
    chart: Box<dyn ChartView>,
    kpis: Box<dyn KpiView>,
    dataset: Option<Vec<CollisionRecord>>,
    spec: FilterSpec,
}

impl Dashboard {
    /// Creates a controller with the default filter state (last 30 days,
    /// all severities, no viewport constraint). No data is loaded yet;
    /// filter events before [`Self::load`] update state but render
    /// nothing.
    #[must_use]
    pub fn new(
        source: Box<dyn CollisionSource>,
        map: Box<dyn MapView>,
        chart: Box<dyn ChartView>,
        kpis: Box<dyn KpiView>,
    ) -> Self {
        let today = chrono::Utc::now().date_naive();
        Self {
            source,
            client: reqwest::Client::new(),
            map,
            chart,
            kpis,
            dataset: None,
            spec: FilterSpec {
                date_range: Some(default_date_range(today)),
                ..FilterSpec::default()
            },
        }
    }

    /// Returns the current filter state.
    #[must_use]
    pub const fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Whether the dataset has been loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    /// Fetches the dataset through the source, normalizes it, caches it,
    /// and renders. User-triggered reloads call this again; a failure
    /// leaves any previously cached data untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Load`] if the fetch fails.
    pub async fn load(&mut self) -> Result<(), DashboardError> {
        log::info!("Loading dataset from {}", self.source.name());
        let features = match self.source.fetch(&self.client).await {
            Ok(features) => features,
            Err(e) => {
                log::error!("Dataset load failed: {e}");
                return Err(e.into());
            }
        };

        self.dataset = Some(normalize_collection(&features));
        self.render();
        Ok(())
    }

    /// Date-control change: replaces the date range and re-renders.
    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.spec.date_range = range;
        self.render();
    }

    /// Severity-control change: replaces the severity selection and
    /// re-renders.
    pub fn set_severity(&mut self, severity: SeverityFilter) {
        self.spec.severity = severity;
        self.render();
    }

    /// Toggles the legacy policy of letting dateless records pass an
    /// active date filter.
    pub fn set_missing_date_passes(&mut self, passes: bool) {
        self.spec.missing_date_passes = passes;
        self.render();
    }

    /// Map pan/zoom end: re-reads the viewport from the map and
    /// re-renders with the new bounds.
    pub fn on_viewport_changed(&mut self) {
        self.spec.viewport = self.map.viewport();
        self.render();
    }

    /// Reset control: restores the default filter state (keeping the
    /// missing-date policy, which is configuration rather than a filter)
    /// and recenters the map.
    pub fn reset(&mut self) {
        let today = chrono::Utc::now().date_naive();
        self.spec = FilterSpec {
            date_range: Some(default_date_range(today)),
            missing_date_passes: self.spec.missing_date_passes,
            ..FilterSpec::default()
        };
        self.map
            .fly_to(DEFAULT_CENTER.0, DEFAULT_CENTER.1, DEFAULT_ZOOM);
        self.render();
    }

    /// Recomputes the filtered set from the cache and pushes it to all
    /// collaborators. A no-op until the dataset has loaded.
    fn render(&mut self) {
        let Some(dataset) = &self.dataset else {
            log::debug!("Filter change before data load; nothing to render");
            return;
        };

        let filtered = collision_map_query::filter(dataset, &self.spec);
        let summary = collision_map_query::summarize(&filtered);
        let series = collision_map_query::histogram(&filtered);

        // Records without geometry still count toward the KPIs and chart
        // but cannot be drawn.
        let mappable: Vec<CollisionRecord> = filtered
            .iter()
            .filter(|record| record.position.is_some())
            .cloned()
            .collect();

        log::debug!(
            "Rendering {} of {} records ({} mappable)",
            filtered.len(),
            dataset.len(),
            mappable.len()
        );

        self.map.set_records(&mappable);
        self.kpis.set_summary(&summary);
        self.chart.set_series(&series);
    }
}
