//! Static `GeoJSON` file collision source.
//!
//! The fallback deployment mode: a `FeatureCollection` snapshot hosted
//! alongside the dashboard, read once and filtered entirely client-side.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{CollisionSource, SourceError, feature_array};

/// A `GeoJSON` `FeatureCollection` file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading from the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CollisionSource for FileSource {
    fn id(&self) -> &str {
        "geojson_file"
    }

    fn name(&self) -> &str {
        "GeoJSON snapshot file"
    }

    async fn fetch(
        &self,
        _client: &reqwest::Client,
    ) -> Result<Vec<serde_json::Value>, SourceError> {
        let data = std::fs::read_to_string(&self.path)?;
        let collection: serde_json::Value = serde_json::from_str(&data)?;
        let features = feature_array(&collection)?;
        log::info!(
            "Loaded {} features from {}",
            features.len(),
            self.path.display()
        );
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_feature_collection_from_disk() {
        let dir = std::env::temp_dir().join("collision_map_file_source_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshot.geojson");
        std::fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{}}]}"#,
        )
        .unwrap();

        let client = reqwest::Client::new();
        let features = FileSource::new(&path).fetch(&client).await.unwrap();
        assert_eq!(features.len(), 1);
    }

    #[tokio::test]
    async fn missing_features_array_is_invalid() {
        let dir = std::env::temp_dir().join("collision_map_file_source_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.json");
        std::fs::write(&path, "{}").unwrap();

        let client = reqwest::Client::new();
        let err = FileSource::new(&path).fetch(&client).await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let client = reqwest::Client::new();
        let err = FileSource::new("/nonexistent/snapshot.geojson")
            .fetch(&client)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
