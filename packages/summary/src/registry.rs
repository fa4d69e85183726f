//! Compile-time registry of summary source configurations.
//!
//! Each source is defined in a TOML file under `sources/`. The registry
//! embeds these at compile time and exposes them via [`all_services`]
//! and [`enabled_services`].

use serde::Deserialize;

use crate::wikipedia::WikipediaSource;
use crate::{SummaryError, SummarySource};

/// A summary source configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryService {
    /// Unique identifier (e.g., `"wikipedia"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this source may be used.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Preference order: lower values are preferred.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Wikipedia REST page summary endpoint.
    Wikipedia {
        /// Endpoint base URL; the title is appended as a path segment.
        base_url: String,
        /// `User-Agent` header sent with every request.
        user_agent: String,
    },
}

const fn default_true() -> bool {
    true
}

impl SummaryService {
    /// Builds a live client for this source.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] if the client cannot be constructed.
    pub fn build_source(&self) -> Result<Box<dyn SummarySource>, SummaryError> {
        match &self.provider {
            ProviderConfig::Wikipedia {
                base_url,
                user_agent,
            } => Ok(Box::new(WikipediaSource::new(base_url, user_agent)?)),
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[("wikipedia", include_str!("../sources/wikipedia.toml"))];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 1;

/// Returns all summary source configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<SummaryService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse summary source '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled sources, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<SummaryService> {
    let mut services: Vec<SummaryService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

/// Builds a client for the highest-priority enabled source.
///
/// # Errors
///
/// Returns [`SummaryError`] if no source is enabled or the client cannot
/// be constructed.
pub fn default_source() -> Result<Box<dyn SummarySource>, SummaryError> {
    let service = enabled_services()
        .into_iter()
        .next()
        .ok_or_else(|| SummaryError::Parse {
            message: "No summary source is enabled".to_string(),
        })?;
    log::info!("Using summary source '{}' ({})", service.id, service.name);
    service.build_source()
}
