//! Read-only projections of browser state for the presentation layer.

use std::collections::BTreeMap;

use heritage_map_buildings::year::decade_distribution;
use heritage_map_buildings_models::{DecadeCount, OverallStats, StreetSummary};
use serde::Serialize;

/// Number of streets listed in the sidebar ranking.
pub const TOP_STREET_LIMIT: usize = 15;

/// One row of the sidebar street ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStreet {
    /// Street name.
    pub street: String,
    /// Number of listed buildings.
    pub count: u64,
    /// Whether this street is the current selection.
    pub selected: bool,
}

/// Everything the sidebar charts and ranking need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarView {
    /// Chart heading: the active street, or all buildings.
    pub title: String,
    /// Highest-ranked streets.
    pub top_streets: Vec<TopStreet>,
    /// Grade distribution of the active street, or of the whole dataset.
    pub grade_counts: BTreeMap<String, u64>,
    /// Year distribution of the active street, or of the whole dataset.
    pub year_counts: BTreeMap<i32, u64>,
    /// `year_counts` binned by decade, gaps included, for the year chart.
    pub decade_counts: Vec<DecadeCount>,
    /// Current street count threshold.
    pub min_street_count: u32,
}

impl SidebarView {
    /// Builds the sidebar for a ranking and an optional active street.
    ///
    /// `active` is the selected street's summary when it survived the
    /// threshold; otherwise the overall distribution is shown.
    #[must_use]
    pub fn build(
        streets: &[StreetSummary],
        overall: &OverallStats,
        selected_street: Option<&str>,
        active: Option<&StreetSummary>,
        min_street_count: u32,
    ) -> Self {
        let top_streets = streets
            .iter()
            .take(TOP_STREET_LIMIT)
            .map(|s| TopStreet {
                street: s.street.clone(),
                count: s.count,
                selected: selected_street == Some(s.street.as_str()),
            })
            .collect();

        let (title, grade_counts, year_counts) = match active {
            Some(summary) => (
                format!("Selected street: {}", summary.street),
                summary.grade_counts.clone(),
                summary.year_counts.clone(),
            ),
            None => (
                "All buildings".to_string(),
                overall.grade_counts.clone(),
                overall.year_counts.clone(),
            ),
        };

        Self {
            title,
            top_streets,
            grade_counts,
            decade_counts: decade_distribution(&year_counts),
            year_counts,
            min_street_count,
        }
    }
}
