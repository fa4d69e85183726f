//! Street corridor aggregation and ranking.
//!
//! Buildings are grouped by trimmed street name. The [`UNKNOWN`] bucket
//! and streets below the minimum count are dropped, and the rest are
//! ranked by count. Ties keep first-seen order, so rank is stable for a
//! given input.

use std::collections::BTreeMap;

use heritage_map_buildings_models::{Feature, Grade, StreetMeta, StreetSummary, UNKNOWN};

use crate::text::label_or_unknown;
use crate::year::{decade_of, resolve_year};

/// Default minimum number of buildings a street needs to be ranked.
pub const DEFAULT_MIN_STREET_COUNT: u32 = 5;

/// Smallest accepted minimum street count.
pub const MIN_STREET_COUNT_FLOOR: u32 = 1;

/// Largest accepted minimum street count.
pub const MIN_STREET_COUNT_CEILING: u32 = 50;

/// Groups features by street and returns the ranked summaries.
///
/// Streets are sorted by count, descending. The sort is stable, so equal
/// counts stay in the order the streets were first encountered.
#[must_use]
pub fn aggregate_by_street(features: &[Feature], min_count: u32) -> Vec<StreetSummary> {
    let mut summaries: Vec<StreetSummary> = Vec::new();
    let mut positions: BTreeMap<String, usize> = BTreeMap::new();

    for feature in features {
        let props = &feature.properties;
        let street = label_or_unknown(props.street.as_deref());
        let grade = label_or_unknown(props.grade.as_deref());

        let idx = *positions.entry(street.to_string()).or_insert_with(|| {
            summaries.push(StreetSummary {
                street: street.to_string(),
                count: 0,
                grade_counts: BTreeMap::new(),
                year_counts: BTreeMap::new(),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[idx];
        summary.count += 1;
        *summary.grade_counts.entry(grade.to_string()).or_insert(0) += 1;
        if let Some(year) = resolve_year(props).filter(|y| *y > 0) {
            *summary.year_counts.entry(year).or_insert(0) += 1;
        }
    }

    let min_count = u64::from(min_count);
    let mut ranked: Vec<StreetSummary> = summaries
        .into_iter()
        .filter(|s| s.street != UNKNOWN)
        .filter(|s| s.count >= min_count)
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Derives ranking metadata for each summary, keyed by street name.
///
/// `summaries` must already be in rank order (as returned by
/// [`aggregate_by_street`]).
#[must_use]
pub fn derive_meta(summaries: &[StreetSummary]) -> BTreeMap<String, StreetMeta> {
    summaries
        .iter()
        .enumerate()
        .map(|(idx, summary)| (summary.street.clone(), street_meta(idx + 1, summary)))
        .collect()
}

fn street_meta(rank: usize, summary: &StreetSummary) -> StreetMeta {
    // BTreeMap keys are already ascending.
    let min_year = summary.year_counts.keys().next().copied();
    let max_year = summary.year_counts.keys().next_back().copied();

    let max_grade_rank = summary
        .grade_counts
        .keys()
        .map(|g| Grade::rank_of(g.as_str()))
        .max()
        .unwrap_or(0);

    let (dominant_decade, dominant_decade_count) = dominant_decade(&summary.year_counts);

    StreetMeta {
        street: summary.street.clone(),
        rank,
        count: summary.count,
        min_year,
        max_year,
        max_grade_rank,
        dominant_decade,
        dominant_decade_count,
    }
}

/// Returns the decade with the largest summed count.
///
/// Decades are scanned in ascending order and only a strictly larger
/// count replaces the current best, so the lowest decade wins ties.
#[must_use]
pub fn dominant_decade(year_counts: &BTreeMap<i32, u64>) -> (Option<i32>, u64) {
    let mut decades: BTreeMap<i32, u64> = BTreeMap::new();
    for (year, count) in year_counts {
        *decades.entry(decade_of(*year)).or_insert(0) += count;
    }

    let mut best = (None, 0);
    for (decade, count) in decades {
        if count > best.1 {
            best = (Some(decade), count);
        }
    }
    best
}

/// Clamps a requested minimum street count into the accepted range.
#[must_use]
pub fn clamp_min_street_count(value: u32) -> u32 {
    value.clamp(MIN_STREET_COUNT_FLOOR, MIN_STREET_COUNT_CEILING)
}

/// Ranked street summaries and their metadata, memoized on the minimum
/// street count.
///
/// The feature set is not stored; callers pass the same immutable set on
/// every call. Changing the threshold rebuilds everything from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetIndex {
    min_count: u32,
    streets: Vec<StreetSummary>,
    meta: BTreeMap<String, StreetMeta>,
}

impl StreetIndex {
    /// Aggregates `features` and derives metadata for `min_count`.
    #[must_use]
    pub fn build(features: &[Feature], min_count: u32) -> Self {
        let min_count = clamp_min_street_count(min_count);
        let streets = aggregate_by_street(features, min_count);
        let meta = derive_meta(&streets);
        log::debug!(
            "Ranked {} streets with at least {min_count} buildings",
            streets.len()
        );
        Self {
            min_count,
            streets,
            meta,
        }
    }

    /// Rebuilds the index if `min_count` differs from the current value.
    ///
    /// Returns `true` if the index was recomputed.
    pub fn set_min_count(&mut self, features: &[Feature], min_count: u32) -> bool {
        let min_count = clamp_min_street_count(min_count);
        if min_count == self.min_count {
            return false;
        }
        *self = Self::build(features, min_count);
        true
    }

    /// The minimum street count this index was built with.
    #[must_use]
    pub const fn min_count(&self) -> u32 {
        self.min_count
    }

    /// Ranked street summaries.
    #[must_use]
    pub fn streets(&self) -> &[StreetSummary] {
        &self.streets
    }

    /// Street name -> metadata.
    #[must_use]
    pub const fn meta(&self) -> &BTreeMap<String, StreetMeta> {
        &self.meta
    }

    /// Looks up the summary for a street, if it survived filtering.
    #[must_use]
    pub fn street(&self, name: &str) -> Option<&StreetSummary> {
        self.streets.iter().find(|s| s.street == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heritage_map_buildings_models::BuildingProperties;

    fn building(id: usize, street: Option<&str>, grade: Option<&str>, year: Option<f64>) -> Feature {
        Feature {
            id,
            longitude: -0.09,
            latitude: 51.5,
            properties: BuildingProperties {
                street: street.map(String::from),
                grade: grade.map(String::from),
                year,
                ..Default::default()
            },
        }
    }

    fn street_of(n: usize, street: &str, start_id: usize) -> Vec<Feature> {
        (0..n)
            .map(|i| building(start_id + i, Some(street), Some("II"), None))
            .collect()
    }

    #[test]
    fn groups_and_filters_by_count() {
        let features = vec![
            building(0, Some("High Street"), Some("I"), Some(1950.0)),
            building(1, Some("High Street "), Some("II"), None),
            building(2, Some(" High Street"), Some("II"), Some(1972.0)),
            building(3, Some("Low Street"), Some("II"), None),
        ];

        let streets = aggregate_by_street(&features, 2);
        assert_eq!(streets.len(), 1);

        let high = &streets[0];
        assert_eq!(high.street, "High Street");
        assert_eq!(high.count, 3);
        assert_eq!(
            high.grade_counts,
            BTreeMap::from([("I".to_string(), 1), ("II".to_string(), 2)])
        );
        assert_eq!(high.year_counts, BTreeMap::from([(1950, 1), (1972, 1)]));
    }

    #[test]
    fn unknown_street_is_never_ranked() {
        let mut features = street_of(3, "Borough High Street", 0);
        for id in 3..10 {
            features.push(building(id, None, Some("II"), None));
        }
        features.push(building(10, Some("   "), Some("II"), None));

        let streets = aggregate_by_street(&features, 1);
        assert_eq!(streets.len(), 1);
        assert!(streets.iter().all(|s| s.street != UNKNOWN));
    }

    #[test]
    fn blank_grade_is_tallied_as_unknown() {
        let features = vec![
            building(0, Some("Bankside"), None, None),
            building(1, Some("Bankside"), Some(" "), None),
        ];
        let streets = aggregate_by_street(&features, 1);
        assert_eq!(streets[0].grade_counts.get(UNKNOWN), Some(&2));
        let total: u64 = streets[0].grade_counts.values().sum();
        assert_eq!(total, streets[0].count);
    }

    #[test]
    fn equal_counts_keep_encounter_order() {
        let mut features = street_of(5, "Tooley Street", 0);
        features.extend(street_of(6, "Union Street", 5));
        features.extend(street_of(5, "Abbey Street", 11));

        let streets = aggregate_by_street(&features, 5);
        let names: Vec<&str> = streets.iter().map(|s| s.street.as_str()).collect();
        assert_eq!(names, ["Union Street", "Tooley Street", "Abbey Street"]);

        let meta = derive_meta(&streets);
        assert_eq!(meta["Union Street"].rank, 1);
        assert_eq!(meta["Tooley Street"].rank, 2);
        assert_eq!(meta["Abbey Street"].rank, 3);
    }

    #[test]
    fn meta_reports_year_range_and_highest_grade() {
        let features = vec![
            building(0, Some("Bermondsey Street"), Some("II"), Some(1988.0)),
            building(1, Some("Bermondsey Street"), Some("II*"), Some(1971.0)),
            building(2, Some("Bermondsey Street"), Some("Unknown"), None),
        ];
        let streets = aggregate_by_street(&features, 1);
        let meta = &derive_meta(&streets)["Bermondsey Street"];

        assert_eq!(meta.rank, 1);
        assert_eq!(meta.count, 3);
        assert_eq!(meta.min_year, Some(1971));
        assert_eq!(meta.max_year, Some(1988));
        assert_eq!(meta.max_grade_rank, 2);
    }

    #[test]
    fn street_without_years_has_no_dominant_decade() {
        let streets = aggregate_by_street(&street_of(2, "Park Street", 0), 1);
        let meta = &derive_meta(&streets)["Park Street"];
        assert_eq!(meta.min_year, None);
        assert_eq!(meta.max_year, None);
        assert_eq!(meta.dominant_decade, None);
        assert_eq!(meta.dominant_decade_count, 0);
        assert_eq!(meta.max_grade_rank, 1);
    }

    #[test]
    fn dominant_decade_tie_goes_to_lowest_decade() {
        let years = BTreeMap::from([(1971, 2), (1979, 1), (1988, 3)]);
        assert_eq!(dominant_decade(&years), (Some(1970), 3));
    }

    #[test]
    fn dominant_decade_picks_largest_sum() {
        let years = BTreeMap::from([(1950, 1), (1972, 1), (1973, 1), (1988, 1)]);
        assert_eq!(dominant_decade(&years), (Some(1970), 2));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let mut features = street_of(5, "Tooley Street", 0);
        features.push(building(5, Some("Tooley Street"), Some("I"), Some(1951.0)));
        features.extend(street_of(7, "Union Street", 6));

        assert_eq!(StreetIndex::build(&features, 5), StreetIndex::build(&features, 5));
    }

    #[test]
    fn index_rebuilds_only_on_threshold_change() {
        let mut features = street_of(5, "Tooley Street", 0);
        features.extend(street_of(2, "Park Street", 5));

        let mut index = StreetIndex::build(&features, DEFAULT_MIN_STREET_COUNT);
        assert_eq!(index.streets().len(), 1);
        assert!(!index.set_min_count(&features, 5));

        assert!(index.set_min_count(&features, 2));
        assert_eq!(index.streets().len(), 2);
        assert!(index.street("Park Street").is_some());
        assert_eq!(index.meta()["Park Street"].rank, 2);
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(clamp_min_street_count(0), 1);
        assert_eq!(clamp_min_street_count(75), 50);
        assert_eq!(StreetIndex::build(&[], 0).min_count(), 1);
    }
}
