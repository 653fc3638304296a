//! Summary statistics and per-day chart series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use collision_map_source_models::CollisionRecord;
use serde::{Deserialize, Serialize};

/// KPI totals for a filtered record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of records.
    pub count: u64,
    /// Sum of reported injuries.
    pub total_injuries: u64,
    /// Sum of reported fatalities.
    pub total_fatalities: u64,
}

/// One day's record count in the time-series chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    /// The calendar day.
    pub day: NaiveDate,
    /// Number of records occurring on that day.
    pub count: u64,
}

/// Computes KPI totals in a single linear pass.
///
/// An empty input deterministically yields all-zero totals.
#[must_use]
pub fn summarize(records: &[CollisionRecord]) -> Summary {
    let mut summary = Summary {
        count: records.len() as u64,
        ..Summary::default()
    };
    for record in records {
        summary.total_injuries += u64::from(record.injuries);
        summary.total_fatalities += u64::from(record.fatalities);
    }
    summary
}

/// Groups records by calendar day of occurrence, ascending by day.
///
/// Records without a known occurrence date are dropped; an empty input
/// yields an empty series.
#[must_use]
pub fn histogram(records: &[CollisionRecord]) -> Vec<DailyBucket> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        if let Some(day) = record.day() {
            *by_day.entry(day).or_insert(0) += 1;
        }
    }
    by_day
        .into_iter()
        .map(|(day, count)| DailyBucket { day, count })
        .collect()
}
