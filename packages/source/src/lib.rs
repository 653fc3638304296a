#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Collision data source trait and record normalization logic.
//!
//! Each dataset variant implements the [`CollisionSource`] trait to define
//! how the raw `GeoJSON` `FeatureCollection` is fetched. Normalization of
//! the loosely-typed features into [`CollisionRecord`]s is shared across
//! sources in [`normalize`].
//!
//! [`CollisionRecord`]: collision_map_source_models::CollisionRecord

pub mod file;
pub mod normalize;
pub mod parsing;
pub mod socrata;

use async_trait::async_trait;

/// Errors that can occur during data source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response was not a usable `FeatureCollection`.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait that all collision data sources implement.
///
/// A source knows how to produce the raw `features` array of a `GeoJSON`
/// `FeatureCollection`; callers pass the result through
/// [`normalize::normalize_collection`] to obtain typed records.
#[async_trait]
pub trait CollisionSource: Send + Sync {
    /// Returns a unique identifier for this source (e.g., `"sdot_socrata"`).
    fn id(&self) -> &str;

    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetches the raw feature array.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the fetch fails or the payload is not a
    /// `FeatureCollection`.
    async fn fetch(&self, client: &reqwest::Client)
    -> Result<Vec<serde_json::Value>, SourceError>;
}

/// Extracts the `features` array from a parsed `FeatureCollection` value.
///
/// # Errors
///
/// Returns [`SourceError::InvalidResponse`] if the value has no `features`
/// array.
pub fn feature_array(collection: &serde_json::Value) -> Result<Vec<serde_json::Value>, SourceError> {
    collection["features"]
        .as_array()
        .cloned()
        .ok_or_else(|| SourceError::InvalidResponse {
            message: "No features array in GeoJSON payload".to_string(),
        })
}
