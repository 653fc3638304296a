//! Normalization of loosely-typed `GeoJSON` features into
//! [`CollisionRecord`]s.
//!
//! Property key casing varies across SDOT deployments (`incdate` vs
//! `INCDATE`), so lookups tolerate both. Normalization never fails:
//! data-quality defects coerce to safe defaults.

use collision_map_collision_models::SeverityCode;
use collision_map_source_models::CollisionRecord;
use serde_json::Value;

use crate::parsing::{parse_count, parse_incident_date, parse_point};

/// Looks up a property by its lowercase key, falling back to the
/// uppercase variant.
fn prop<'a>(properties: &'a Value, key: &str) -> Option<&'a Value> {
    let object = properties.as_object()?;
    object
        .get(key)
        .or_else(|| object.get(key.to_uppercase().as_str()))
        .filter(|value| !value.is_null())
}

/// Looks up a property as trimmed, non-empty text.
fn prop_text(properties: &Value, key: &str) -> Option<String> {
    let text = prop(properties, key)?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Normalizes one raw `GeoJSON` feature into a [`CollisionRecord`].
///
/// `index` is the feature's position in the collection, used to
/// synthesize an ID when the source record carries none.
#[must_use]
pub fn normalize_feature(raw: &Value, index: usize) -> CollisionRecord {
    let properties = &raw["properties"];

    let id = raw["id"]
        .as_str()
        .map(ToString::to_string)
        .or_else(|| raw["id"].as_u64().map(|n| n.to_string()))
        .or_else(|| prop_text(properties, "objectid"))
        .unwrap_or_else(|| format!("idx-{index}"));

    let occurred_at = prop(properties, "incdate")
        .and_then(Value::as_str)
        .and_then(parse_incident_date);

    let severity = prop(properties, "severitycode")
        .and_then(Value::as_str)
        .map_or(SeverityCode::Unknown, SeverityCode::from_code);

    CollisionRecord {
        id,
        occurred_at,
        severity,
        injuries: parse_count(prop(properties, "injuries")),
        serious_injuries: parse_count(prop(properties, "seriousinjuries")),
        fatalities: parse_count(prop(properties, "fatalities")),
        location: prop_text(properties, "location"),
        collision_type: prop_text(properties, "collisiontype"),
        position: parse_point(&raw["geometry"]),
    }
}

/// Normalizes a full feature array.
#[must_use]
pub fn normalize_collection(features: &[Value]) -> Vec<CollisionRecord> {
    let records: Vec<CollisionRecord> = features
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_feature(raw, index))
        .collect();

    let dated = records.iter().filter(|r| r.occurred_at.is_some()).count();
    let positioned = records.iter().filter(|r| r.position.is_some()).count();
    log::info!(
        "Normalized {} records ({dated} dated, {positioned} with geometry)",
        records.len()
    );

    records
}
