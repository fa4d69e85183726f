//! Loading the static building dataset and boundary overlay.
//!
//! Both files are read once at startup. The building collection is
//! sanitized immediately; the boundary is parsed as `GeoJSON` and passed
//! through for display only.

use std::path::Path;

use geojson::GeoJson;
use heritage_map_buildings_models::{Feature, OverallStats};
use serde_json::Value;

use crate::DatasetError;
use crate::overall::overall_stats;
use crate::sanitize::{properties_to_json, sanitize};

/// The usable feature set with its dataset-wide statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Feature>,
    overall: OverallStats,
    dropped: usize,
}

impl Dataset {
    /// Reads a `GeoJSON` `FeatureCollection` of building points from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be read or is not JSON.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)?;
        let dataset = Self::from_collection(&value);
        log::info!(
            "Loaded {} buildings from {} ({} malformed features dropped)",
            dataset.features.len(),
            path.display(),
            dataset.dropped
        );
        Ok(dataset)
    }

    /// Builds a dataset from an in-memory `FeatureCollection`.
    ///
    /// A collection without a `features` array yields an empty dataset.
    #[must_use]
    pub fn from_collection(collection: &Value) -> Self {
        let raw = collection
            .get("features")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice);

        let features = sanitize(raw);
        let dropped = raw.len() - features.len();
        if dropped > 0 {
            log::warn!("Dropped {dropped} features with invalid point geometry");
        }

        Self {
            overall: overall_stats(&features),
            features,
            dropped,
        }
    }

    /// Builds a dataset from already-sanitized features.
    #[must_use]
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self {
            overall: overall_stats(&features),
            features,
            dropped: 0,
        }
    }

    /// The usable features, in dataset order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Looks up a feature by its sanitized position.
    #[must_use]
    pub fn feature(&self, id: usize) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Grade and year distributions across all usable features.
    #[must_use]
    pub const fn overall(&self) -> &OverallStats {
        &self.overall
    }

    /// Number of input records dropped by sanitization.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Renders the usable features as a `GeoJSON` `FeatureCollection` for
    /// the map layer. Each feature's `id` is its sanitized position.
    #[must_use]
    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        let features = self
            .features
            .iter()
            .map(|f| geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                    f.longitude,
                    f.latitude,
                ]))),
                id: Some(geojson::feature::Id::Number(f.id.into())),
                properties: Some(properties_to_json(&f.properties)),
                foreign_members: None,
            })
            .collect();

        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// Reads the boundary overlay polygon collection.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or is not valid
/// `GeoJSON`.
pub fn load_boundary(path: &Path) -> Result<GeoJson, DatasetError> {
    let raw = std::fs::read_to_string(path)?;
    let boundary: GeoJson = raw.parse()?;
    log::info!("Loaded boundary overlay from {}", path.display());
    Ok(boundary)
}
