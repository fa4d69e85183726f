#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! External summary lookup for listed buildings.
//!
//! Given a building's display name, [`query::derive_queries`] produces
//! one or two search titles (simplified first, then the raw name) and
//! [`lookup::lookup`] tries them in order against a [`SummarySource`],
//! stopping at the first hit or the first hard failure.
//!
//! A "not found" answer from the source is an expected outcome and is
//! kept distinct from transport and server errors.

pub mod lookup;
pub mod query;
pub mod registry;
pub mod wikipedia;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a summary source. "Not found" is not an error; see
/// [`SummaryResponse::NotFound`].
#[derive(Debug, Error)]
pub enum SummaryError {
    /// HTTP request failed (connection, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status other than 404.
    #[error("Unexpected status: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response or configuration parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// A page summary returned by a source. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPage {
    /// Canonical page title.
    pub title: Option<String>,
    /// Short human-readable extract.
    pub extract: Option<String>,
    /// Canonical page URL.
    pub url: Option<String>,
}

/// Outcome of a single query against a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResponse {
    /// The source has a page for this title.
    Found(SummaryPage),
    /// The source has no page for this title.
    NotFound,
}

/// State of the external summary panel for the selected building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExternalSummaryResult {
    /// No lookup requested.
    #[default]
    Idle,
    /// A lookup is in flight.
    Loading,
    /// A page was found.
    #[serde(rename_all = "camelCase")]
    Found {
        /// Page title (falls back to the query that matched).
        title: String,
        /// Page extract, if the source returned one.
        extract: Option<String>,
        /// Page URL, if the source returned one.
        url: Option<String>,
    },
    /// Every query came back "not found".
    NotFound,
    /// The source failed; the user may retry.
    Error,
}

/// A remote source of page summaries keyed by free-text title.
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Returns a unique identifier for this source (e.g., `"wikipedia"`).
    fn id(&self) -> &str;

    /// Fetches the summary for a single title.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] for any failure other than "not found".
    async fn fetch(&self, query: &str) -> Result<SummaryResponse, SummaryError>;
}
