//! Shared parsing utilities for collision data sources.
//!
//! Malformed input here is a data-quality event, not a failure: every
//! function returns a default (`None` or `0`) instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use collision_map_source_models::Position;

/// Parses an incident date string.
///
/// Accepts ISO-8601 date-times with or without fractional seconds (both
/// `T` and space separators), bare `YYYY-MM-DD` dates, and RFC-1123-style
/// strings such as `"Wed, 12 Jun 2024 00:00:00 GMT"`. Anything else
/// yields `None`.
#[must_use]
pub fn parse_incident_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }
    None
}

/// Coerces a loosely-typed count field to a non-negative integer.
///
/// Accepts JSON numbers and numeric strings; missing, non-numeric, or
/// negative input coerces to 0.
#[must_use]
pub fn parse_count(value: Option<&serde_json::Value>) -> u32 {
    let Some(value) = value else {
        return 0;
    };
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(u32::MAX);
    }
    if let Some(f) = value.as_f64() {
        if f.is_finite() && f >= 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return f.min(f64::from(u32::MAX)) as u32;
        }
        return 0;
    }
    if let Some(s) = value.as_str() {
        if let Ok(f) = s.trim().parse::<f64>() {
            if f.is_finite() && f >= 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                return f.min(f64::from(u32::MAX)) as u32;
            }
        }
    }
    0
}

/// Extracts a point position from a `GeoJSON` `geometry` value.
///
/// Only `Point` geometries with two finite numeric coordinates are
/// accepted; anything else yields `None`.
#[must_use]
pub fn parse_point(geometry: &serde_json::Value) -> Option<Position> {
    if geometry["type"].as_str()? != "Point" {
        return None;
    }
    let coordinates = geometry["coordinates"].as_array()?;
    if coordinates.len() < 2 {
        return None;
    }
    let longitude = coordinates[0].as_f64()?;
    let latitude = coordinates[1].as_f64()?;
    if !longitude.is_finite() || !latitude.is_finite() {
        return None;
    }
    Some(Position::new(longitude, latitude))
}
