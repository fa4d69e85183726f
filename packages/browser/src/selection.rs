//! What the user currently has selected.

use heritage_map_buildings::streets::{DEFAULT_MIN_STREET_COUNT, clamp_min_street_count};
use heritage_map_buildings_models::Feature;
use serde::Serialize;

/// Selected building, selected street, and the street count threshold.
///
/// The two selections are independent: clearing one never touches the
/// other. A selected street need not survive the threshold filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    building: Option<Feature>,
    street: Option<String>,
    min_street_count: u32,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            building: None,
            street: None,
            min_street_count: DEFAULT_MIN_STREET_COUNT,
        }
    }
}

impl SelectionState {
    /// Selects a building from the map and follows it to its street.
    ///
    /// A building with a blank street clears the street selection rather
    /// than selecting the "Unknown" group.
    pub fn select_building(&mut self, feature: Feature) {
        self.street = feature
            .properties
            .street
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        self.building = Some(feature);
    }

    /// Selects a street from the ranked list, leaving the building as is.
    pub fn select_street(&mut self, name: impl Into<String>) {
        self.street = Some(name.into());
    }

    pub fn clear_street(&mut self) {
        self.street = None;
    }

    pub fn clear_building(&mut self) {
        self.building = None;
    }

    /// Updates the threshold, clamped to 1-50. Returns the applied value.
    pub fn set_min_street_count(&mut self, value: u32) -> u32 {
        self.min_street_count = clamp_min_street_count(value);
        self.min_street_count
    }

    #[must_use]
    pub const fn building(&self) -> Option<&Feature> {
        self.building.as_ref()
    }

    #[must_use]
    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    #[must_use]
    pub const fn min_street_count(&self) -> u32 {
        self.min_street_count
    }
}
