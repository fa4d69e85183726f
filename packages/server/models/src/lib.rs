#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the heritage map server.
//!
//! These types are serialized to JSON for the map and chart front end.
//! They wrap the browser's read-only views so the API contract can evolve
//! independently of the internal state types.

use heritage_map_browser::Browser;
use heritage_map_browser::view::SidebarView;
use heritage_map_buildings_models::{BuildingStory, Feature, StreetMeta, StreetSummary};
use heritage_map_summary::ExternalSummaryResult;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Number of usable buildings loaded.
    pub building_count: usize,
}

/// A ranked street with its summary and derived metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStreet {
    /// Per-street tallies.
    #[serde(flatten)]
    pub summary: StreetSummary,
    /// Rank, year range, highest grade, dominant decade.
    pub meta: Option<StreetMeta>,
}

/// Response for `GET /api/streets`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStreets {
    /// Threshold the ranking was built with.
    pub min_street_count: u32,
    /// Streets in rank order.
    pub streets: Vec<ApiStreet>,
}

impl From<&Browser> for ApiStreets {
    fn from(browser: &Browser) -> Self {
        let meta = browser.street_meta();
        Self {
            min_street_count: browser.selection().min_street_count(),
            streets: browser
                .streets()
                .iter()
                .map(|s| ApiStreet {
                    summary: s.clone(),
                    meta: meta.get(&s.street).cloned(),
                })
                .collect(),
        }
    }
}

/// Response for `GET /api/selection` and every selection mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSelection {
    /// Selected building, if any.
    pub building: Option<Feature>,
    /// Selected street, if any. May not appear in the current ranking.
    pub street: Option<String>,
    /// Current street count threshold.
    pub min_street_count: u32,
    /// Sidebar ranking and active distributions.
    pub sidebar: SidebarView,
    /// Story card for the selected building.
    pub story: Option<BuildingStory>,
    /// External summary panel state.
    pub summary: ExternalSummaryResult,
    /// Whether the summary lookup can be triggered.
    pub can_lookup: bool,
}

impl From<&Browser> for ApiSelection {
    fn from(browser: &Browser) -> Self {
        let selection = browser.selection();
        Self {
            building: selection.building().cloned(),
            street: selection.street().map(String::from),
            min_street_count: selection.min_street_count(),
            sidebar: browser.sidebar(),
            story: browser.story(),
            summary: browser.lookup_result().clone(),
            can_lookup: !browser.lookup_queries().is_empty()
                && *browser.lookup_result() != ExternalSummaryResult::Loading,
        }
    }
}

/// Body for `POST /api/selection/building`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectBuildingRequest {
    /// Feature id from the buildings collection.
    pub id: usize,
}

/// Body for `POST /api/selection/street`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectStreetRequest {
    /// Street name from the ranking.
    pub street: String,
}

/// Body for `PUT /api/threshold`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRequest {
    /// Requested minimum buildings per street (clamped to 1-50).
    pub min_street_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_request_uses_camel_case() {
        let req: ThresholdRequest =
            serde_json::from_str(r#"{ "minStreetCount": 12 }"#).unwrap();
        assert_eq!(req.min_street_count, 12);
    }

    #[test]
    fn summary_state_is_tagged() {
        let value = serde_json::to_value(ExternalSummaryResult::Found {
            title: "Borough Market".to_string(),
            extract: None,
            url: Some("https://en.wikipedia.org/wiki/Borough_Market".to_string()),
        })
        .unwrap();
        assert_eq!(value["status"], "found");
        assert_eq!(value["title"], "Borough Market");
        assert_eq!(
            serde_json::to_value(ExternalSummaryResult::NotFound).unwrap()["status"],
            "notFound"
        );
    }
}
