#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Pure filtering and aggregation over normalized collision records.
//!
//! [`filter`] applies a [`FilterSpec`] as a single linear pass: date
//! range, severity, and viewport predicates compose conjunctively, the
//! output is an order-preserving subsequence of the input, and the whole
//! thing is idempotent. [`aggregate`] computes the KPI summary and the
//! per-day chart series from a filtered set.

pub mod aggregate;

use chrono::NaiveDate;
use collision_map_collision_models::SeverityFilter;
use collision_map_source_models::{CollisionRecord, Position};
use serde::{Deserialize, Serialize};

pub use aggregate::{DailyBucket, Summary, histogram, summarize};

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Whether the position lies inside the box (boundaries inclusive).
    ///
    /// Boxes crossing the antimeridian (west > east) are unsupported and
    /// match nothing.
    #[must_use]
    pub fn contains(&self, position: &Position) -> bool {
        (self.west..=self.east).contains(&position.longitude)
            && (self.south..=self.north).contains(&position.latitude)
    }
}

/// An inclusive calendar-day range.
///
/// Expands to `[start 00:00:00, end 23:59:59]` when matched against
/// timestamps. A range with `start > end` matches nothing, which is the
/// correct result for an inverted date selection, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new calendar-day range.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether the timestamp's calendar day falls inside the range.
    #[must_use]
    pub fn contains(&self, at: chrono::NaiveDateTime) -> bool {
        (self.start..=self.end).contains(&at.date())
    }
}

/// The full filter state of the dashboard, recreated on every control
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Restrict to records occurring within this calendar-day range.
    pub date_range: Option<DateRange>,
    /// Restrict to one severity code, or pass everything.
    pub severity: SeverityFilter,
    /// Restrict to records positioned inside the current map viewport.
    pub viewport: Option<BoundingBox>,
    /// Legacy compatibility switch: when `true`, records with no parsable
    /// occurrence date pass an active date filter instead of failing it.
    pub missing_date_passes: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            date_range: None,
            severity: SeverityFilter::All,
            viewport: None,
            missing_date_passes: false,
        }
    }
}

impl FilterSpec {
    /// Whether a record satisfies every active constraint.
    #[must_use]
    pub fn matches(&self, record: &CollisionRecord) -> bool {
        let date_ok = self.date_range.is_none_or(|range| {
            record
                .occurred_at
                .map_or(self.missing_date_passes, |at| range.contains(at))
        });

        let severity_ok = self.severity.matches(&record.severity);

        let viewport_ok = self.viewport.is_none_or(|bbox| {
            record
                .position
                .is_some_and(|position| bbox.contains(&position))
        });

        date_ok && severity_ok && viewport_ok
    }
}

/// Filters records to those matching every active constraint in `spec`.
///
/// A single linear pass preserving the input's relative order.
#[must_use]
pub fn filter(records: &[CollisionRecord], spec: &FilterSpec) -> Vec<CollisionRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use collision_map_collision_models::SeverityCode;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, day: Option<(i32, u32, u32)>, severity: &str) -> CollisionRecord {
        CollisionRecord {
            id: id.to_string(),
            occurred_at: day.map(|(y, m, d)| date(y, m, d).and_hms_opt(12, 0, 0).unwrap()),
            severity: SeverityCode::from_code(severity),
            injuries: 0,
            serious_injuries: 0,
            fatalities: 0,
            location: None,
            collision_type: None,
            position: None,
        }
    }

    fn positioned(id: &str, longitude: f64, latitude: f64) -> CollisionRecord {
        CollisionRecord {
            position: Some(Position::new(longitude, latitude)),
            ..record(id, Some((2024, 1, 1)), "1")
        }
    }

    #[test]
    fn default_spec_passes_everything_in_order() {
        let records = vec![
            record("a", Some((2024, 1, 1)), "1"),
            record("b", None, "3"),
            record("c", Some((2024, 1, 2)), "2b"),
        ];
        let out = filter(&records, &FilterSpec::default());
        assert_eq!(out, records);
    }

    #[test]
    fn filter_is_idempotent() {
        let records = vec![
            record("a", Some((2024, 1, 1)), "1"),
            record("b", Some((2024, 1, 5)), "2"),
            record("c", None, "1"),
        ];
        let spec = FilterSpec {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 3))),
            severity: SeverityFilter::from_selection("1"),
            ..FilterSpec::default()
        };
        let once = filter(&records, &spec);
        let twice = filter(&once, &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn date_range_is_inclusive_of_both_ends() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(range.contains(date(2024, 1, 31).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!range.contains(date(2024, 2, 1).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        let records = vec![record("a", Some((2024, 1, 15)), "1")];
        let spec = FilterSpec {
            date_range: Some(DateRange::new(date(2024, 2, 1), date(2024, 1, 1))),
            ..FilterSpec::default()
        };
        assert!(filter(&records, &spec).is_empty());
    }

    #[test]
    fn missing_date_fails_active_date_filter_by_default() {
        let records = vec![
            record("dated", Some((2024, 1, 15)), "1"),
            record("dateless", None, "1"),
        ];
        let spec = FilterSpec {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 31))),
            ..FilterSpec::default()
        };
        let out = filter(&records, &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "dated");
    }

    #[test]
    fn missing_date_passes_with_legacy_flag() {
        let records = vec![record("dateless", None, "1")];
        let spec = FilterSpec {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 31))),
            missing_date_passes: true,
            ..FilterSpec::default()
        };
        assert_eq!(filter(&records, &spec).len(), 1);
    }

    #[test]
    fn severity_scenario_from_mixed_input() {
        let records = vec![
            record("a", Some((2024, 1, 1)), "1"),
            record("b", Some((2024, 1, 1)), "1"),
            record("c", Some((2024, 1, 2)), "3"),
        ];
        let spec = FilterSpec {
            severity: SeverityFilter::from_selection("1"),
            ..FilterSpec::default()
        };
        let out = filter(&records, &spec);
        assert_eq!(out.len(), 2);
        assert!(
            out.iter()
                .all(|r| r.day() == Some(date(2024, 1, 1)))
        );
    }

    #[test]
    fn viewport_scenario_includes_and_excludes() {
        let records = vec![
            positioned("outside", -122.5, 47.6),
            positioned("inside", -122.33, 47.60),
        ];
        let spec = FilterSpec {
            viewport: Some(BoundingBox::new(-122.4, 47.5, -122.2, 47.7)),
            ..FilterSpec::default()
        };
        let out = filter(&records, &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "inside");
    }

    #[test]
    fn viewport_excludes_records_without_position() {
        let records = vec![record("nowhere", Some((2024, 1, 1)), "1")];
        let spec = FilterSpec {
            viewport: Some(BoundingBox::new(-180.0, -90.0, 180.0, 90.0)),
            ..FilterSpec::default()
        };
        assert!(filter(&records, &spec).is_empty());
    }

    #[test]
    fn viewport_boundary_is_inclusive() {
        let bbox = BoundingBox::new(-122.4, 47.5, -122.2, 47.7);
        assert!(bbox.contains(&Position::new(-122.4, 47.5)));
        assert!(bbox.contains(&Position::new(-122.2, 47.7)));
        assert!(!bbox.contains(&Position::new(-122.41, 47.6)));
    }

    #[test]
    fn constraints_compose_conjunctively() {
        let mut a = positioned("a", -122.33, 47.6);
        a.occurred_at = Some(date(2024, 1, 10).and_hms_opt(8, 0, 0).unwrap());
        a.severity = SeverityCode::Injury;
        let mut b = positioned("b", -122.33, 47.6);
        b.occurred_at = Some(date(2024, 1, 10).and_hms_opt(8, 0, 0).unwrap());
        b.severity = SeverityCode::Fatality;

        let spec = FilterSpec {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 31))),
            severity: SeverityFilter::from_selection("2"),
            viewport: Some(BoundingBox::new(-122.4, 47.5, -122.2, 47.7)),
            missing_date_passes: false,
        };
        let out = filter(&[a, b], &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
    }
}
