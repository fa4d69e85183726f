//! Lifecycle of the external summary lookup.
//!
//! Each trigger takes a [`LookupTicket`] stamped with a new generation.
//! Selecting another building, clearing the building, clearing the
//! lookup, or triggering again all advance the generation, so a ticket
//! that comes back late no longer matches and its result is dropped.

use heritage_map_summary::{ExternalSummaryResult, SummarySource, lookup::lookup};

/// A claim on the lookup slot for one in-flight lookup sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    building_id: usize,
    queries: Vec<String>,
}

impl LookupTicket {
    /// The building this lookup was started for.
    #[must_use]
    pub const fn building_id(&self) -> usize {
        self.building_id
    }
}

/// Runs the lookup sequence for `ticket`. Holds no browser state, so the
/// selection can change while this is awaited.
pub async fn run_lookup(source: &dyn SummarySource, ticket: &LookupTicket) -> ExternalSummaryResult {
    lookup(source, &ticket.queries).await
}

/// The current lookup result and the generation allowed to replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LookupSlot {
    generation: u64,
    result: ExternalSummaryResult,
}

impl LookupSlot {
    /// Returns to idle and invalidates any outstanding ticket.
    pub(crate) fn reset(&mut self) {
        self.generation += 1;
        self.result = ExternalSummaryResult::Idle;
    }

    /// Marks the slot loading and issues a ticket for the new generation.
    pub(crate) fn begin(&mut self, building_id: usize, queries: Vec<String>) -> LookupTicket {
        self.generation += 1;
        self.result = ExternalSummaryResult::Loading;
        LookupTicket {
            generation: self.generation,
            building_id,
            queries,
        }
    }

    /// Stores `result` if `ticket` is still current. Returns whether it
    /// was applied.
    pub(crate) fn apply(&mut self, ticket: &LookupTicket, result: ExternalSummaryResult) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Discarding stale lookup for building {} (generation {} != {})",
                ticket.building_id,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.result = result;
        true
    }

    pub(crate) const fn result(&self) -> &ExternalSummaryResult {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_ticket_applies() {
        let mut slot = LookupSlot::default();
        let ticket = slot.begin(1, vec!["George Inn".to_string()]);
        assert_eq!(slot.result(), &ExternalSummaryResult::Loading);

        assert!(slot.apply(&ticket, ExternalSummaryResult::NotFound));
        assert_eq!(slot.result(), &ExternalSummaryResult::NotFound);
    }

    #[test]
    fn reset_invalidates_outstanding_ticket() {
        let mut slot = LookupSlot::default();
        let ticket = slot.begin(1, vec!["George Inn".to_string()]);
        slot.reset();

        assert!(!slot.apply(&ticket, ExternalSummaryResult::Error));
        assert_eq!(slot.result(), &ExternalSummaryResult::Idle);
    }

    #[test]
    fn retrigger_supersedes_previous_ticket() {
        let mut slot = LookupSlot::default();
        let first = slot.begin(1, vec!["George Inn".to_string()]);
        let second = slot.begin(1, vec!["George Inn".to_string()]);

        assert!(!slot.apply(&first, ExternalSummaryResult::Error));
        assert_eq!(slot.result(), &ExternalSummaryResult::Loading);
        assert!(slot.apply(&second, ExternalSummaryResult::NotFound));
    }
}
