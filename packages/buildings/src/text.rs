//! Text normalization for building attributes.
//!
//! Aggregation and display treat blank values differently: aggregation
//! folds them into the [`UNKNOWN`] sentinel, display treats them as
//! absent.

use heritage_map_buildings_models::UNKNOWN;

/// Trims a value, folding missing or blank input into [`UNKNOWN`].
#[must_use]
pub fn label_or_unknown(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => UNKNOWN,
    }
}

/// Trims a value for display. Blank values and the literal `nan` left
/// behind by dataframe exports are treated as absent.
#[must_use]
pub fn clean_text(value: Option<&str>) -> Option<String> {
    let s = value?.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return None;
    }
    Some(s.to_string())
}

/// Returns the listing description link if it looks like a URL.
#[must_use]
pub fn listing_url(value: Option<&str>) -> Option<String> {
    let url = value?.trim();
    url.starts_with("http").then(|| url.to_string())
}
