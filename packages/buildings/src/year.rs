//! Listing year resolution.

use std::collections::BTreeMap;

use heritage_map_buildings_models::{BuildingProperties, DecadeCount};

/// Resolves the listing year of a building.
///
/// A finite numeric `year` greater than zero wins, truncated toward zero.
/// Values whose integral part is 0 or does not fit in an `i32` are not
/// usable years and fall through to the listing date. The first four
/// characters of the listing date must be exactly four ASCII digits
/// forming a positive number. Anything else is an unknown year; a short
/// or non-digit-prefixed date is never partially parsed.
#[must_use]
pub fn resolve_year(props: &BuildingProperties) -> Option<i32> {
    if let Some(year) = props.year.and_then(numeric_year) {
        return Some(year);
    }

    let raw = props.date_of_listing.as_deref()?.trim();
    let prefix = raw.get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    prefix.parse::<i32>().ok().filter(|y| *y > 0)
}

#[allow(clippy::cast_possible_truncation)]
fn numeric_year(year: f64) -> Option<i32> {
    let year = year.trunc();
    (1.0..=f64::from(i32::MAX))
        .contains(&year)
        .then_some(year as i32)
}

/// Returns the start year of the decade containing `year` (1975 -> 1970).
#[must_use]
pub const fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Bins year counts into a continuous run of decades for the listing
/// year chart.
///
/// The run spans the lowest to the highest decade present. Decades with
/// no listings are included with a count of 0. An empty input yields no
/// bins.
#[must_use]
pub fn decade_distribution(year_counts: &BTreeMap<i32, u64>) -> Vec<DecadeCount> {
    let (Some(first), Some(last)) = (
        year_counts.keys().next().copied(),
        year_counts.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut bins: BTreeMap<i32, u64> = (decade_of(first)..=decade_of(last))
        .step_by(10)
        .map(|decade| (decade, 0))
        .collect();
    for (year, count) in year_counts {
        *bins.entry(decade_of(*year)).or_insert(0) += count;
    }

    bins.into_iter()
        .map(|(decade, count)| DecadeCount {
            decade,
            label: format!("{decade}s"),
            count,
        })
        .collect()
}
