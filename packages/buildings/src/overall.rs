//! Dataset-wide grade and year distributions.

use heritage_map_buildings_models::{Feature, OverallStats};

use crate::text::label_or_unknown;
use crate::year::resolve_year;

/// Tallies grades and listing years across every feature.
///
/// Uses the same trimming and [`UNKNOWN`](heritage_map_buildings_models::UNKNOWN)
/// rules as street aggregation, without grouping or count filtering.
#[must_use]
pub fn overall_stats(features: &[Feature]) -> OverallStats {
    let mut stats = OverallStats::default();

    for feature in features {
        let props = &feature.properties;
        let grade = label_or_unknown(props.grade.as_deref());
        *stats.grade_counts.entry(grade.to_string()).or_insert(0) += 1;

        if let Some(year) = resolve_year(props) {
            *stats.year_counts.entry(year).or_insert(0) += 1;
        }
    }

    stats
}
