//! Building story card: a selected building's own attributes plus
//! corridor tags computed from its street's ranking metadata.

use std::collections::BTreeMap;

use heritage_map_buildings_models::{BuildingStory, Feature, Grade, StreetMeta, UNKNOWN};

use crate::text::{clean_text, listing_url};
use crate::year::{decade_of, resolve_year};

/// Name shown when a building has no usable name.
pub const UNNAMED_BUILDING: &str = "Unnamed listed building";

/// Builds the story card for `feature` against the current street
/// metadata.
#[must_use]
pub fn building_story(feature: &Feature, meta: &BTreeMap<String, StreetMeta>) -> BuildingStory {
    let props = &feature.properties;
    let name = clean_text(props.name.as_deref()).unwrap_or_else(|| UNNAMED_BUILDING.to_string());
    let grade = clean_text(props.grade.as_deref());
    let street = clean_text(props.street.as_deref());
    let year = resolve_year(props);

    let street_key = street.as_deref().unwrap_or(UNKNOWN);
    let tags = match meta.get(street_key) {
        Some(street_meta) => corridor_tags(street_meta, grade.as_deref(), year),
        None if street_key != UNKNOWN => vec!["Not ranked (street data incomplete)".to_string()],
        None => Vec::new(),
    };

    BuildingStory {
        name,
        grade,
        year,
        street,
        listing_url: listing_url(props.listing_description.as_deref()),
        tags,
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn corridor_tags(meta: &StreetMeta, grade: Option<&str>, year: Option<i32>) -> Vec<String> {
    let mut tags = vec![format!(
        "Corridor rank: {} ({} listed buildings)",
        meta.rank, meta.count
    )];

    if let Some(decade) = meta.dominant_decade {
        tags.push(format!("Dominant listing decade: {decade}s"));
        if year.map(decade_of) == Some(decade) {
            tags.push("Matches dominant decade".to_string());
        }

        if meta.dominant_decade_count > 0 && meta.count > 0 {
            let pct = (meta.dominant_decade_count as f64 / meta.count as f64 * 100.0).round() as u64;
            tags.push(format!("Listing wave strength: {pct}% in {decade}s"));
        }
    }

    let own_rank = Grade::rank_of(grade.unwrap_or(UNKNOWN));
    if own_rank > 0 && own_rank == meta.max_grade_rank {
        tags.push("Highest grade on this street".to_string());
    }

    if let Some(year) = year {
        if meta.min_year == Some(year) {
            tags.push(format!("Earliest listed on this street ({year})"));
        }
        if meta.max_year == Some(year) {
            tags.push(format!("Most recently listed on this street ({year})"));
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use heritage_map_buildings_models::BuildingProperties;

    fn meta_for(street: &str) -> BTreeMap<String, StreetMeta> {
        BTreeMap::from([(
            street.to_string(),
            StreetMeta {
                street: street.to_string(),
                rank: 2,
                count: 8,
                min_year: Some(1950),
                max_year: Some(1998),
                max_grade_rank: 2,
                dominant_decade: Some(1970),
                dominant_decade_count: 5,
            },
        )])
    }

    fn feature(props: BuildingProperties) -> Feature {
        Feature {
            id: 3,
            longitude: -0.08,
            latitude: 51.5,
            properties: props,
        }
    }

    #[test]
    fn tags_building_on_ranked_street() {
        let building = feature(BuildingProperties {
            name: Some(" St George the Martyr ".to_string()),
            grade: Some("II*".to_string()),
            street: Some("Borough High Street".to_string()),
            date_of_listing: Some("1950-10-30".to_string()),
            listing_description: Some("https://example.org/1385937.pdf".to_string()),
            ..Default::default()
        });
        let story = building_story(&building, &meta_for("Borough High Street"));

        assert_eq!(story.name, "St George the Martyr");
        assert_eq!(story.year, Some(1950));
        assert_eq!(
            story.listing_url.as_deref(),
            Some("https://example.org/1385937.pdf")
        );
        assert_eq!(
            story.tags,
            vec![
                "Corridor rank: 2 (8 listed buildings)",
                "Dominant listing decade: 1970s",
                "Listing wave strength: 63% in 1970s",
                "Highest grade on this street",
                "Earliest listed on this street (1950)",
            ]
        );
    }

    #[test]
    fn matches_dominant_decade() {
        let building = feature(BuildingProperties {
            grade: Some("II".to_string()),
            street: Some("Borough High Street".to_string()),
            year: Some(1974.0),
            ..Default::default()
        });
        let story = building_story(&building, &meta_for("Borough High Street"));
        assert!(story.tags.contains(&"Matches dominant decade".to_string()));
        assert!(!story.tags.contains(&"Highest grade on this street".to_string()));
    }

    #[test]
    fn unranked_street_is_flagged() {
        let building = feature(BuildingProperties {
            street: Some("Mint Street".to_string()),
            ..Default::default()
        });
        let story = building_story(&building, &meta_for("Borough High Street"));
        assert_eq!(story.name, UNNAMED_BUILDING);
        assert_eq!(story.tags, vec!["Not ranked (street data incomplete)"]);
    }

    #[test]
    fn missing_street_has_no_tags() {
        let building = feature(BuildingProperties {
            name: Some("nan".to_string()),
            street: Some("  ".to_string()),
            grade: Some("NaN".to_string()),
            ..Default::default()
        });
        let story = building_story(&building, &meta_for("Borough High Street"));
        assert_eq!(story.name, UNNAMED_BUILDING);
        assert_eq!(story.street, None);
        assert_eq!(story.grade, None);
        assert!(story.tags.is_empty());
    }
}
