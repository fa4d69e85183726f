//! Search title derivation for building names.
//!
//! Listed building names often carry qualifiers that no encyclopedia
//! title has: `"Former Warehouse at 12 Dock Street"` is better searched
//! as `"Warehouse"`. The simplified title is tried first and the raw
//! name second.

use regex::Regex;
use std::sync::LazyLock;

/// Leading "Former " qualifier.
static FORMER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Former\s+").expect("valid regex"));

/// Trailing "at <location>" clause.
static AT_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+at\s+.+$").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strips the "Former " prefix and trailing "at ..." clause from a name
/// and collapses whitespace. Returns `None` if nothing is left.
#[must_use]
pub fn simplify_name(name: &str) -> Option<String> {
    let s = FORMER_PREFIX_RE.replace(name.trim(), "");
    let s = AT_LOCATION_RE.replace(&s, "");
    let s = WHITESPACE_RE.replace_all(&s, " ");
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Returns the titles to try, in order.
///
/// The simplified name comes first when it differs from the raw name
/// (ignoring case); the raw name is always last. A blank name yields no
/// queries.
#[must_use]
pub fn derive_queries(raw_name: &str) -> Vec<String> {
    let raw = raw_name.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match simplify_name(raw) {
        Some(simple) if simple.to_lowercase() != raw.to_lowercase() => {
            vec![simple, raw.to_string()]
        }
        _ => vec![raw.to_string()],
    }
}
