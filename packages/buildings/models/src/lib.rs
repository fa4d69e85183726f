#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listed building types shared across the heritage-map system.
//!
//! A [`Feature`] is one listed building as it survives ingestion. Street
//! and overall statistics ([`StreetSummary`], [`StreetMeta`],
//! [`OverallStats`]) are derived from the feature set and never mutated
//! in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Placeholder label for a missing or blank street or grade.
pub const UNKNOWN: &str = "Unknown";

/// Heritage protection tier of a listed building.
///
/// Ordered from least to most significant, so [`Grade::One`] (grade I) compares
/// greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString)]
pub enum Grade {
    /// Grade II: buildings of special interest.
    #[strum(serialize = "II")]
    Two = 1,
    /// Grade II*: particularly important buildings.
    #[strum(serialize = "II*")]
    TwoStar = 2,
    /// Grade I: buildings of exceptional interest.
    #[strum(serialize = "I")]
    One = 3,
}

impl Grade {
    /// Returns the ordinal rank of this grade (`I` = 3, `II*` = 2, `II` = 1).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns the rank for a raw grade label.
    ///
    /// Labels outside the known set (including [`UNKNOWN`]) rank 0.
    #[must_use]
    pub fn rank_of(label: &str) -> u8 {
        label.parse::<Self>().map_or(0, Self::rank)
    }
}

/// Attributes of a listed building as read from the source dataset.
///
/// Text fields hold the raw values; trimming and sentinel handling happen
/// in the consumers because they differ between aggregation and selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingProperties {
    /// Building name (`NAME`).
    pub name: Option<String>,
    /// Grade code (`GRADE`), e.g. `"II*"`.
    pub grade: Option<String>,
    /// Street name (`STREET`).
    pub street: Option<String>,
    /// Listing date string (`DATE_OF_LISTING`), year first.
    pub date_of_listing: Option<String>,
    /// Numeric listing year (`year`), if the dataset carries one.
    pub year: Option<f64>,
    /// Link to the official listing description (`LISTING_DESCRIPTION`).
    pub listing_description: Option<String>,
}

/// One usable listed building point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Position of this feature in the sanitized feature list.
    pub id: usize,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Building attributes.
    pub properties: BuildingProperties,
}

/// Per-street tallies built from the feature set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetSummary {
    /// Trimmed street name.
    pub street: String,
    /// Number of features on this street.
    pub count: u64,
    /// Grade label -> feature count. Values sum to `count`.
    pub grade_counts: BTreeMap<String, u64>,
    /// Listing year -> feature count. Features without a year are omitted.
    pub year_counts: BTreeMap<i32, u64>,
}

/// Ranking and derived metrics for one surviving street.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetMeta {
    /// Street name.
    pub street: String,
    /// 1-based position after sorting by count, descending.
    pub rank: usize,
    /// Number of features on this street.
    pub count: u64,
    /// Earliest listing year on this street.
    pub min_year: Option<i32>,
    /// Latest listing year on this street.
    pub max_year: Option<i32>,
    /// Highest [`Grade::rank`] seen on this street, 0 if none.
    pub max_grade_rank: u8,
    /// Start year of the decade with the most listings.
    pub dominant_decade: Option<i32>,
    /// Number of listings in the dominant decade.
    pub dominant_decade_count: u64,
}

/// Grade and year tallies across every usable feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    /// Grade label -> feature count.
    pub grade_counts: BTreeMap<String, u64>,
    /// Listing year -> feature count.
    pub year_counts: BTreeMap<i32, u64>,
}

/// One bar of the listing year chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecadeCount {
    /// First year of the decade (1970 for the 1970s).
    pub decade: i32,
    /// Axis label, e.g. `"1970s"`.
    pub label: String,
    /// Listings in this decade; 0 for a gap between populated decades.
    pub count: u64,
}

/// Display card for a selected building, combining its own attributes
/// with tags derived from its street's [`StreetMeta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingStory {
    /// Display name.
    pub name: String,
    /// Cleaned grade label, `None` when missing.
    pub grade: Option<String>,
    /// Resolved listing year.
    pub year: Option<i32>,
    /// Cleaned street name, `None` when missing.
    pub street: Option<String>,
    /// Official listing description URL.
    pub listing_url: Option<String>,
    /// Corridor tags in display order.
    pub tags: Vec<String>,
}
