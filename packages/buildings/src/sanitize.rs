//! Ingestion filter for raw point features.
//!
//! The building dataset is externally sourced and may contain partial
//! records. Anything that is not a `Point` with exactly two finite
//! coordinates is dropped here and never reaches statistics or the map.

use heritage_map_buildings_models::{BuildingProperties, Feature};
use serde_json::{Map, Value};

/// Filters raw `GeoJSON`-like records down to usable point features.
///
/// Order is preserved. Each surviving feature's `id` is its position in
/// the returned list.
#[must_use]
pub fn sanitize(raw: &[Value]) -> Vec<Feature> {
    raw.iter()
        .filter_map(point_coordinates)
        .enumerate()
        .map(|(id, (longitude, latitude, properties))| Feature {
            id,
            longitude,
            latitude,
            properties,
        })
        .collect()
}

/// Extracts `(lng, lat, properties)` from a record with valid point
/// geometry.
fn point_coordinates(record: &Value) -> Option<(f64, f64, BuildingProperties)> {
    let geometry = record.get("geometry")?;
    if geometry.get("type").and_then(Value::as_str) != Some("Point") {
        return None;
    }

    let [lng, lat] = geometry.get("coordinates")?.as_array()?.as_slice() else {
        return None;
    };
    let lng = lng.as_f64().filter(|v| v.is_finite())?;
    let lat = lat.as_f64().filter(|v| v.is_finite())?;

    let properties = record
        .get("properties")
        .and_then(Value::as_object)
        .map(properties_from_json)
        .unwrap_or_default();

    Some((lng, lat, properties))
}

/// Reads the building attributes from a `GeoJSON` property bag.
#[must_use]
pub fn properties_from_json(props: &Map<String, Value>) -> BuildingProperties {
    BuildingProperties {
        name: text_field(props, "NAME"),
        grade: text_field(props, "GRADE"),
        street: text_field(props, "STREET"),
        date_of_listing: text_field(props, "DATE_OF_LISTING"),
        year: numeric_field(props, "year"),
        listing_description: text_field(props, "LISTING_DESCRIPTION"),
    }
}

/// Writes building attributes back into a `GeoJSON` property bag using
/// the dataset's column names.
#[must_use]
pub fn properties_to_json(props: &BuildingProperties) -> Map<String, Value> {
    let mut map = Map::new();
    let mut put = |key: &str, value: Option<&String>| {
        if let Some(v) = value {
            map.insert(key.to_string(), Value::String(v.clone()));
        }
    };
    put("NAME", props.name.as_ref());
    put("GRADE", props.grade.as_ref());
    put("STREET", props.street.as_ref());
    put("DATE_OF_LISTING", props.date_of_listing.as_ref());
    put("LISTING_DESCRIPTION", props.listing_description.as_ref());

    if let Some(year) = props.year.and_then(serde_json::Number::from_f64) {
        map.insert("year".to_string(), Value::Number(year));
    }
    map
}

fn text_field(props: &Map<String, Value>, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric coercion for the `year` column: JSON numbers, or strings that
/// parse as numbers.
fn numeric_field(props: &Map<String, Value>, key: &str) -> Option<f64> {
    match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
