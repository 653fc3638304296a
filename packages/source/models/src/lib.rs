#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data source configuration types and the canonical normalized collision
//! record format.
//!
//! Every dataset variant (Socrata API, static `GeoJSON` file) produces
//! [`CollisionRecord`] values carrying the severity taxonomy from
//! [`collision_map_collision_models`].

use chrono::NaiveDateTime;
use collision_map_collision_models::SeverityCode;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The kind of dataset a source reads from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// Socrata SODA API returning a `GeoJSON` `FeatureCollection`.
    SocrataApi,
    /// Static `GeoJSON` `FeatureCollection` file on disk.
    GeojsonFile,
}

/// Configuration for a collision data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Unique identifier for this source.
    pub id: String,
    /// Human-readable name (e.g., "SDOT Collisions All Years").
    pub name: String,
    /// What kind of dataset this source reads.
    pub source_type: SourceType,
    /// API endpoint URL or file path, depending on [`Self::source_type`].
    pub location: String,
}

/// A point position in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Longitude.
    pub longitude: f64,
    /// Latitude.
    pub latitude: f64,
}

impl Position {
    /// Creates a position from a longitude/latitude pair.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A collision incident normalized to the canonical schema.
///
/// Immutable once loaded. Every field tolerates missing or malformed
/// source data: dates that fail to parse become `None`, counts default to
/// zero, and a missing severity becomes [`SeverityCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionRecord {
    /// Source incident ID, or a synthesized `idx-{n}` when the source
    /// record carries none.
    pub id: String,
    /// When the collision occurred. `None` when the source date field was
    /// missing or unparseable.
    pub occurred_at: Option<NaiveDateTime>,
    /// Severity code. Never absent; unreported severity is
    /// [`SeverityCode::Unknown`].
    pub severity: SeverityCode,
    /// Number of injuries.
    pub injuries: u32,
    /// Number of serious injuries.
    pub serious_injuries: u32,
    /// Number of fatalities.
    pub fatalities: u32,
    /// Free-text location description.
    pub location: Option<String>,
    /// Free-text collision type label (e.g., "Angles", "Rear Ended").
    pub collision_type: Option<String>,
    /// Point position. `None` for records lacking valid point geometry;
    /// such records are skipped by map rendering but still count toward
    /// date and severity aggregates.
    pub position: Option<Position>,
}

impl CollisionRecord {
    /// Returns the calendar day of occurrence, if the date is known.
    #[must_use]
    pub fn day(&self) -> Option<chrono::NaiveDate> {
        self.occurred_at.map(|at| at.date())
    }
}
