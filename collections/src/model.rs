//! Current detail record

use crate::collection::{FetchState, FetchTicket};

/// Holds the record shown on a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSlot<T> {
    model: Option<T>,
    fetch: FetchState,
}

impl<T> ModelSlot<T> {
    /// Empty slot
    #[must_use]
    pub const fn new() -> Self {
        Self {
            model: None,
            fetch: FetchState::new(),
        }
    }

    /// Current record, if loaded
    #[must_use]
    pub const fn model(&self) -> Option<&T> {
        self.model.as_ref()
    }

    /// Mutable access to the current record
    pub const fn model_mut(&mut self) -> Option<&mut T> {
        self.model.as_mut()
    }

    /// Replace the current record
    pub fn set_model(&mut self, model: T) {
        self.model = Some(model);
    }

    /// Drop the current record
    pub fn clear(&mut self) -> Option<T> {
        self.model.take()
    }

    /// Whether a request is in flight
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.fetch.is_fetching()
    }

    /// Set the fetching flag directly
    pub const fn set_fetching(&mut self, fetching: bool) {
        self.fetch.set_fetching(fetching);
    }

    /// Mark a fetch as started
    pub const fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch.begin()
    }

    /// Ticket of the most recent fetch, if any was started
    #[must_use]
    pub const fn latest_ticket(&self) -> Option<FetchTicket> {
        self.fetch.latest()
    }

    /// Drop the in-flight fetch: its response will be treated as stale
    pub const fn cancel_fetch(&mut self) {
        self.fetch.cancel();
    }

    /// Commit a fetched record unless a newer fetch superseded it
    pub fn complete_fetch(&mut self, ticket: FetchTicket, model: T) -> bool {
        if !self.fetch.settle(ticket) {
            tracing::debug!(generation = ticket.generation(), "Dropping stale model response");
            return false;
        }
        self.model = Some(model);
        true
    }

    /// Clear the fetching flag after a failed fetch
    pub const fn fail_fetch(&mut self, ticket: FetchTicket) -> bool {
        self.fetch.settle(ticket)
    }
}

impl<T> Default for ModelSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear() {
        let mut slot = ModelSlot::new();
        assert!(slot.model().is_none());

        slot.set_model("Hub".to_string());
        assert_eq!(slot.model().map(String::as_str), Some("Hub"));

        assert_eq!(slot.clear().as_deref(), Some("Hub"));
        assert!(slot.model().is_none());
    }

    #[test]
    fn stale_model_response_is_dropped() {
        let mut slot = ModelSlot::new();
        let first = slot.begin_fetch();
        let second = slot.begin_fetch();

        assert!(slot.complete_fetch(second, 2));
        assert!(!slot.complete_fetch(first, 1));
        assert_eq!(slot.model(), Some(&2));
        assert!(!slot.is_fetching());
    }

    #[test]
    fn cancelled_model_fetch_is_dropped() {
        let mut slot = ModelSlot::new();
        let ticket = slot.begin_fetch();
        slot.cancel_fetch();

        assert!(!slot.is_fetching());
        assert!(!slot.complete_fetch(ticket, 1));
        assert!(!slot.fail_fetch(ticket));
        assert!(slot.model().is_none());
    }
}
