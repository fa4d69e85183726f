#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection state and summary lookup lifecycle for the heritage map.
//!
//! [`Browser`] is the single owner of all mutable session state: the
//! current selection, the memoized street ranking, and the external
//! summary result. Map clicks, sidebar clicks, the threshold slider, and
//! the lookup controls all go through its methods; the presentation layer
//! only reads views.

pub mod lookup;
pub mod selection;
pub mod view;

use std::collections::BTreeMap;
use std::sync::Arc;

use heritage_map_buildings::dataset::Dataset;
use heritage_map_buildings::story::building_story;
use heritage_map_buildings::streets::StreetIndex;
use heritage_map_buildings::text::clean_text;
use heritage_map_buildings_models::{BuildingStory, OverallStats, StreetMeta, StreetSummary};
use heritage_map_summary::query::derive_queries;
use heritage_map_summary::{ExternalSummaryResult, SummarySource};
use thiserror::Error;

use crate::lookup::{LookupSlot, LookupTicket, run_lookup};
use crate::selection::SelectionState;
use crate::view::SidebarView;

/// Errors from browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// No usable feature has this id.
    #[error("Unknown building id {id}")]
    UnknownBuilding {
        /// The requested feature id.
        id: usize,
    },
}

/// Session state over one immutable dataset.
#[derive(Debug, Clone)]
pub struct Browser {
    dataset: Arc<Dataset>,
    index: StreetIndex,
    selection: SelectionState,
    lookup: LookupSlot,
}

impl Browser {
    /// Creates a browser with nothing selected and the default threshold.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let selection = SelectionState::default();
        let index = StreetIndex::build(dataset.features(), selection.min_street_count());
        Self {
            dataset,
            index,
            selection,
            lookup: LookupSlot::default(),
        }
    }

    /// Selects a building by feature id (a map click).
    ///
    /// The street selection follows the building. Choosing a different
    /// building resets the summary lookup to idle and abandons any lookup
    /// in flight.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::UnknownBuilding`] if `id` is not a usable
    /// feature.
    pub fn select_building(&mut self, id: usize) -> Result<(), BrowserError> {
        let feature = self
            .dataset
            .feature(id)
            .cloned()
            .ok_or(BrowserError::UnknownBuilding { id })?;

        if self.selection.building().map(|f| f.id) != Some(id) {
            self.lookup.reset();
        }
        self.selection.select_building(feature);
        log::debug!(
            "Selected building {id} (street: {:?})",
            self.selection.street()
        );
        Ok(())
    }

    /// Selects a street from the ranking without changing the building.
    pub fn select_street(&mut self, name: impl Into<String>) {
        self.selection.select_street(name);
    }

    pub fn clear_street(&mut self) {
        self.selection.clear_street();
    }

    /// Clears the building selection and resets the summary lookup.
    pub fn clear_building(&mut self) {
        self.selection.clear_building();
        self.lookup.reset();
    }

    /// Changes the street count threshold and re-ranks if it changed.
    /// Returns the applied (clamped) value.
    pub fn set_min_street_count(&mut self, value: u32) -> u32 {
        let applied = self.selection.set_min_street_count(value);
        if self.index.set_min_count(self.dataset.features(), applied) {
            log::info!(
                "Re-ranked streets at threshold {applied}: {} streets",
                self.index.streets().len()
            );
        }
        applied
    }

    /// Titles the summary lookup would try for the selected building.
    #[must_use]
    pub fn lookup_queries(&self) -> Vec<String> {
        self.selection
            .building()
            .and_then(|f| clean_text(f.properties.name.as_deref()))
            .map(|name| derive_queries(&name))
            .unwrap_or_default()
    }

    /// Starts a lookup for the selected building.
    ///
    /// Returns `None` (and changes nothing) if no building is selected or
    /// it has no usable name. Otherwise the result becomes
    /// [`ExternalSummaryResult::Loading`] and any earlier ticket is
    /// superseded.
    pub fn begin_lookup(&mut self) -> Option<LookupTicket> {
        let building_id = self.selection.building()?.id;
        let queries = self.lookup_queries();
        if queries.is_empty() {
            return None;
        }
        log::debug!("Starting summary lookup for building {building_id}: {queries:?}");
        Some(self.lookup.begin(building_id, queries))
    }

    /// Stores a finished lookup's result if its ticket is still current.
    /// Returns whether the result was applied.
    pub fn apply_lookup(&mut self, ticket: &LookupTicket, result: ExternalSummaryResult) -> bool {
        self.lookup.apply(ticket, result)
    }

    /// Resets the summary panel to idle.
    pub fn clear_lookup(&mut self) {
        self.lookup.reset();
    }

    /// Begins, runs, and applies a lookup in one step.
    ///
    /// Holds the browser for the whole sequence; callers that need the
    /// selection to stay responsive should use [`Self::begin_lookup`],
    /// [`run_lookup`], and [`Self::apply_lookup`] instead.
    pub async fn fetch_summary(&mut self, source: &dyn SummarySource) -> &ExternalSummaryResult {
        if let Some(ticket) = self.begin_lookup() {
            let result = run_lookup(source, &ticket).await;
            self.apply_lookup(&ticket, result);
        }
        self.lookup.result()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Ranked streets at the current threshold.
    #[must_use]
    pub fn streets(&self) -> &[StreetSummary] {
        self.index.streets()
    }

    #[must_use]
    pub const fn street_meta(&self) -> &BTreeMap<String, StreetMeta> {
        self.index.meta()
    }

    #[must_use]
    pub fn overall(&self) -> &OverallStats {
        self.dataset.overall()
    }

    #[must_use]
    pub const fn lookup_result(&self) -> &ExternalSummaryResult {
        self.lookup.result()
    }

    /// The selected street's summary, or `None` if nothing is selected or
    /// the street did not survive the threshold.
    #[must_use]
    pub fn selected_street_summary(&self) -> Option<&StreetSummary> {
        self.index.street(self.selection.street()?)
    }

    #[must_use]
    pub fn sidebar(&self) -> SidebarView {
        SidebarView::build(
            self.index.streets(),
            self.dataset.overall(),
            self.selection.street(),
            self.selected_street_summary(),
            self.selection.min_street_count(),
        )
    }

    /// Story card for the selected building.
    #[must_use]
    pub fn story(&self) -> Option<BuildingStory> {
        self.selection
            .building()
            .map(|f| building_story(f, self.index.meta()))
    }
}
