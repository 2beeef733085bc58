//! Named collections with a fetching flag

use std::borrow::Cow;

/// Identifies one fetch of a collection or model slot
///
/// Each `begin_fetch` hands out a ticket with a higher generation. Only the
/// ticket of the most recent fetch can commit, so a slow response that
/// resolves after a newer one is dropped instead of overwriting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Generation number of this ticket
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Tracks the in-flight fetch generation shared by collections and model slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FetchState {
    generation: u64,
    fetching: bool,
}

impl FetchState {
    pub(crate) const fn new() -> Self {
        Self {
            generation: 0,
            fetching: false,
        }
    }

    pub(crate) const fn is_fetching(self) -> bool {
        self.fetching
    }

    pub(crate) const fn set_fetching(&mut self, fetching: bool) {
        self.fetching = fetching;
    }

    pub(crate) const fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.fetching = true;
        FetchTicket(self.generation)
    }

    pub(crate) const fn is_current(self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    pub(crate) const fn latest(self) -> Option<FetchTicket> {
        if self.generation == 0 {
            None
        } else {
            Some(FetchTicket(self.generation))
        }
    }

    /// Supersedes the in-flight fetch without starting a new one
    pub(crate) const fn cancel(&mut self) {
        self.generation += 1;
        self.fetching = false;
    }

    /// Clears the flag when `ticket` is current. Returns whether it was.
    pub(crate) const fn settle(&mut self, ticket: FetchTicket) -> bool {
        if self.is_current(ticket) {
            self.fetching = false;
            true
        } else {
            false
        }
    }
}

/// An ordered list of records plus the flag that drives loading indicators
///
/// The name keeps several collections in one state struct apart
/// (`projects`, `contributors`). It also yields the loading attribute
/// used in log output, e.g. `users` gives `loadingUsers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    name: Cow<'static, str>,
    items: Vec<T>,
    fetch: FetchState,
}

impl<T> Collection<T> {
    /// Name used when none is given
    pub const DEFAULT_NAME: &'static str = "collection";

    /// Empty collection with the default name
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: Cow::Borrowed(Self::DEFAULT_NAME),
            items: Vec::new(),
            fetch: FetchState::new(),
        }
    }

    /// Empty collection with the given name
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Collection name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Loading attribute for this collection (`loading` + capitalized name)
    #[must_use]
    pub fn fetching_attribute(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("loading{}{}", first.to_uppercase(), chars.as_str()),
            None => "loading".to_string(),
        }
    }

    /// Current records
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace all records
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Mutable access for in-place edits of individual records
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
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

    /// Mark a fetch as started and return its ticket
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = self.fetch.begin();
        tracing::debug!(
            collection = %self.fetching_attribute(),
            generation = ticket.generation(),
            "Fetch started"
        );
        ticket
    }

    /// Whether `ticket` belongs to the most recent fetch
    #[must_use]
    pub const fn is_current(&self, ticket: FetchTicket) -> bool {
        self.fetch.is_current(ticket)
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

    /// Commit the records of a finished fetch
    ///
    /// Returns `false` and leaves the collection untouched when a newer
    /// fetch has started since `ticket` was issued.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, items: Vec<T>) -> bool {
        if !self.fetch.settle(ticket) {
            tracing::debug!(
                collection = %self.fetching_attribute(),
                generation = ticket.generation(),
                "Dropping stale response"
            );
            return false;
        }
        self.items = items;
        true
    }

    /// Clear the fetching flag after a failed fetch
    ///
    /// Returns `false` when the failure belongs to a superseded fetch.
    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> bool {
        self.fetch.settle(ticket)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tickets for requests that fill no collection, such as saves
///
/// Every request gets a fresh ticket so its outcome can be told apart from
/// concurrent requests of the same kind. Unlike fetches, every outstanding
/// request counts: none supersedes another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketIssuer {
    generation: u64,
    pending: usize,
}

impl TicketIssuer {
    /// Issuer with nothing in flight
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            pending: 0,
        }
    }

    /// Ticket for a new request
    pub const fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        self.pending += 1;
        FetchTicket(self.generation)
    }

    /// Mark one request as finished
    pub const fn settle(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// Requests still in flight
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Most recently issued ticket
    #[must_use]
    pub const fn latest(&self) -> Option<FetchTicket> {
        if self.generation == 0 {
            None
        } else {
            Some(FetchTicket(self.generation))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetching_attribute_capitalizes_name() {
        assert_eq!(Collection::<String>::named("users").fetching_attribute(), "loadingUsers");
        assert_eq!(Collection::<String>::named("projects").fetching_attribute(), "loadingProjects");
        assert_eq!(Collection::<String>::new().fetching_attribute(), "loadingCollection");
        assert_eq!(Collection::<String>::named("").fetching_attribute(), "loading");
    }

    #[test]
    fn named_collections_are_independent() {
        let mut projects = Collection::named("projects");
        let contributors: Collection<String> = Collection::named("contributors");

        projects.set_items(vec!["Hub".to_string()]);
        projects.set_fetching(true);

        assert_eq!(projects.len(), 1);
        assert!(projects.is_fetching());
        assert!(contributors.is_empty());
        assert!(!contributors.is_fetching());
    }

    #[test]
    fn fetch_lifecycle_clears_flag_on_success() {
        let mut collection = Collection::named("projects");
        let ticket = collection.begin_fetch();
        assert!(collection.is_fetching());

        assert!(collection.complete_fetch(ticket, vec![1, 2, 3]));
        assert!(!collection.is_fetching());
        assert_eq!(collection.items(), &[1, 2, 3]);
    }

    #[test]
    fn fetch_lifecycle_clears_flag_on_failure() {
        let mut collection: Collection<i32> = Collection::named("projects");
        let ticket = collection.begin_fetch();

        assert!(collection.fail_fetch(ticket));
        assert!(!collection.is_fetching());
    }

    #[test]
    fn latest_request_wins() {
        let mut collection = Collection::named("projects");
        let first = collection.begin_fetch();
        let second = collection.begin_fetch();

        // Second request resolves first
        assert!(collection.complete_fetch(second, vec![2]));
        // First request resolves late and is dropped
        assert!(!collection.complete_fetch(first, vec![1]));

        assert_eq!(collection.items(), &[2]);
        assert!(!collection.is_fetching());
    }

    #[test]
    fn cancelled_fetch_cannot_commit() {
        let mut collection = Collection::named("projects");
        assert_eq!(collection.latest_ticket(), None);

        let ticket = collection.begin_fetch();
        assert_eq!(collection.latest_ticket(), Some(ticket));

        collection.cancel_fetch();
        assert!(!collection.is_fetching());
        assert!(!collection.complete_fetch(ticket, vec![1]));
        assert!(collection.is_empty());
    }

    #[test]
    fn issued_tickets_are_distinct_and_counted() {
        let mut issuer = TicketIssuer::new();
        let first = issuer.issue();
        let second = issuer.issue();

        assert_ne!(first, second);
        assert_eq!(issuer.latest(), Some(second));
        assert_eq!(issuer.pending(), 2);

        issuer.settle();
        issuer.settle();
        issuer.settle();
        assert_eq!(issuer.pending(), 0);
    }

    #[test]
    fn stale_failure_keeps_newer_fetch_in_flight() {
        let mut collection: Collection<i32> = Collection::new();
        let first = collection.begin_fetch();
        let second = collection.begin_fetch();

        assert!(!collection.fail_fetch(first));
        assert!(collection.is_fetching());
        assert!(collection.is_current(second));
    }
}
