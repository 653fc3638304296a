//! Socrata SODA API collision source.
//!
//! Fetches a `GeoJSON` `FeatureCollection` from a Socrata dataset (e.g.
//! SDOT Collisions All Years, `qdnv-25h8`), pushing an optional date range
//! and severity constraint into the `$where` clause so the server does the
//! first cut of filtering.

use async_trait::async_trait;
use chrono::NaiveDate;
use collision_map_collision_models::SeverityFilter;

use crate::{CollisionSource, SourceError, feature_array};

/// Default record cap for a dashboard load.
pub const DEFAULT_LIMIT: u64 = 5000;

/// A Socrata SODA `GeoJSON` endpoint.
pub struct SocrataSource {
    api_url: String,
    date_range: Option<(NaiveDate, NaiveDate)>,
    severity: SeverityFilter,
    limit: u64,
}

impl SocrataSource {
    /// Creates a source for the given `.geojson` resource URL with no
    /// server-side filters and the default record limit.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            date_range: None,
            severity: SeverityFilter::All,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Restricts the server-side query to `incdate` within the inclusive
    /// calendar-day range.
    #[must_use]
    pub const fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Restricts the server-side query to one severity code.
    #[must_use]
    pub fn with_severity(mut self, severity: SeverityFilter) -> Self {
        self.severity = severity;
        self
    }

    /// Overrides the record limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Builds the SODA query parameters: `$limit`, plus a `$where` clause
    /// combining the active date and severity constraints with ` AND `.
    #[must_use]
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut where_parts = Vec::new();

        if let Some((start, end)) = self.date_range {
            where_parts.push(format!(
                "incdate between '{start}T00:00:00' and '{end}T23:59:59'"
            ));
        }

        if let SeverityFilter::Code(code) = &self.severity {
            where_parts.push(format!("severitycode='{}'", code.code()));
        }

        let mut params = vec![("$limit".to_string(), self.limit.to_string())];
        if !where_parts.is_empty() {
            params.push(("$where".to_string(), where_parts.join(" AND ")));
        }
        params
    }
}

#[async_trait]
impl CollisionSource for SocrataSource {
    fn id(&self) -> &str {
        "sdot_socrata"
    }

    fn name(&self) -> &str {
        "Socrata collision dataset"
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
    ) -> Result<Vec<serde_json::Value>, SourceError> {
        let params = self.query_params();
        log::info!("Fetching {} with {} params", self.api_url, params.len());

        let response = client.get(&self.api_url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::InvalidResponse {
                message: format!("Socrata request failed with status {status}"),
            });
        }

        let collection: serde_json::Value = response.json().await?;
        let features = feature_array(&collection)?;
        log::info!("Downloaded {} features", features.len());
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use collision_map_collision_models::SeverityCode;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unfiltered_query_has_only_limit() {
        let source = SocrataSource::new("https://example.test/resource/qdnv-25h8.geojson");
        assert_eq!(
            source.query_params(),
            vec![("$limit".to_string(), "5000".to_string())]
        );
    }

    #[test]
    fn date_range_builds_between_clause() {
        let source = SocrataSource::new("https://example.test/x.geojson")
            .with_date_range(date(2024, 1, 1), date(2024, 1, 31));
        let params = source.query_params();
        assert_eq!(
            params[1].1,
            "incdate between '2024-01-01T00:00:00' and '2024-01-31T23:59:59'"
        );
    }

    #[test]
    fn severity_and_date_join_with_and() {
        let source = SocrataSource::new("https://example.test/x.geojson")
            .with_date_range(date(2024, 1, 1), date(2024, 1, 31))
            .with_severity(SeverityFilter::Code(SeverityCode::SeriousInjury));
        let params = source.query_params();
        assert_eq!(
            params[1].1,
            "incdate between '2024-01-01T00:00:00' and '2024-01-31T23:59:59' \
             AND severitycode='2b'"
        );
    }

    #[test]
    fn all_severity_adds_no_clause() {
        let source = SocrataSource::new("https://example.test/x.geojson")
            .with_severity(SeverityFilter::All)
            .with_limit(100);
        assert_eq!(
            source.query_params(),
            vec![("$limit".to_string(), "100".to_string())]
        );
    }
}
