#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listed building ingestion and street statistics.
//!
//! The pipeline is a chain of pure functions over an immutable feature
//! set:
//!
//! 1. [`sanitize::sanitize`] drops malformed records.
//! 2. [`year::resolve_year`] extracts a listing year from each building.
//! 3. [`streets::aggregate_by_street`] groups buildings into ranked
//!    [`StreetSummary`](heritage_map_buildings_models::StreetSummary)
//!    entries.
//! 4. [`streets::derive_meta`] computes rank, year range, highest grade,
//!    and dominant decade per street.
//! 5. [`overall::overall_stats`] tallies the whole set.
//!
//! Everything is recomputed from scratch when its inputs change; nothing
//! is patched incrementally.

pub mod dataset;
pub mod overall;
pub mod sanitize;
pub mod story;
pub mod streets;
pub mod text;
pub mod year;

use thiserror::Error;

/// Errors that can occur while loading dataset files.
///
/// Malformed individual features are never errors; they are dropped by
/// [`sanitize::sanitize`].
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The boundary overlay is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}
