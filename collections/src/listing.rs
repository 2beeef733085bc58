//! Collection + filter + pagination with derived views
//!
//! A [`Listing`] owns the raw collection and keeps two derived views in
//! step with it: the filtered view (when the listing has a filter) and the
//! current page. Every transition that changes an input recomputes both
//! synchronously before returning.

use crate::collection::{Collection, FetchTicket};
use crate::filter::{Filter, FilterAction, Named};
use crate::pagination::{PageLink, Pagination, PaginationAction};
use mentorhub_core::{SmallVec, effect::Effect, reducer::Reducer};
use std::borrow::Cow;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// A paginated, optionally filtered list of records
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    collection: Collection<T>,
    filter: Option<Filter>,
    pagination: Pagination,
    filtered: Vec<T>,
    page: Vec<T>,
}

impl<T: Named + Clone> Listing<T> {
    /// Paginated listing without a filter
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            collection: Collection::named(name),
            filter: None,
            pagination: Pagination::default(),
            filtered: Vec::new(),
            page: Vec::new(),
        }
    }

    /// Paginated listing with a filter
    #[must_use]
    pub fn filtered(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            filter: Some(Filter::new()),
            ..Self::new(name)
        }
    }

    /// Use a different page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Raw collection
    #[must_use]
    pub const fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Filter inputs, if this listing is filtered
    #[must_use]
    pub const fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Page position
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Source the pages are cut from: the filtered view, or the raw
    /// collection when there is no filter
    #[must_use]
    pub fn filtered_items(&self) -> &[T] {
        if self.filter.is_some() {
            &self.filtered
        } else {
            self.collection.items()
        }
    }

    /// Records on the current page
    #[must_use]
    pub fn page(&self) -> &[T] {
        &self.page
    }

    /// Whether a fetch is in flight
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.collection.is_fetching()
    }

    /// Whether inactive records are requested (false without a filter)
    #[must_use]
    pub fn showing_inactive(&self) -> bool {
        self.filter.as_ref().is_some_and(Filter::showing_inactive)
    }

    fn refilter(&mut self) {
        if let Some(filter) = &self.filter {
            self.filtered = filter.apply(self.collection.items());
        }
        self.repaginate();
    }

    fn repaginate(&mut self) {
        let source = if self.filter.is_some() {
            &self.filtered
        } else {
            self.collection.items()
        };
        self.page = self.pagination.paginate(source);
    }

    // Collection transitions

    /// Start a fetch
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.collection.begin_fetch()
    }

    /// Ticket of the most recent fetch
    #[must_use]
    pub const fn latest_ticket(&self) -> Option<FetchTicket> {
        self.collection.latest_ticket()
    }

    /// Commit fetched records and recompute the views
    ///
    /// Returns `false` for a superseded fetch.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, items: Vec<T>) -> bool {
        if self.collection.complete_fetch(ticket, items) {
            self.refilter();
            true
        } else {
            false
        }
    }

    /// Clear the fetching flag after a failure
    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> bool {
        self.collection.fail_fetch(ticket)
    }

    /// Replace the records and recompute the views
    pub fn set_items(&mut self, items: Vec<T>) {
        self.collection.set_items(items);
        self.refilter();
    }

    /// Edit records in place and recompute the views
    pub fn update_items(&mut self, f: impl FnOnce(&mut Vec<T>)) {
        f(self.collection.items_mut());
        self.refilter();
    }

    // Filter transitions

    /// Replace the query and recompute
    pub fn set_filter(&mut self, query: impl Into<String>) {
        if let Some(filter) = &mut self.filter {
            filter.set_query(query);
        }
        self.refilter();
    }

    /// Flip the sort direction and recompute
    pub fn toggle_order_by(&mut self) {
        if let Some(filter) = &mut self.filter {
            filter.toggle_order_by();
        }
        self.refilter();
    }

    /// Flip the inactive toggle
    ///
    /// Returns the new value, or `None` without a filter. The caller must
    /// re-fetch from the matching endpoint.
    pub fn toggle_inactive(&mut self) -> Option<bool> {
        self.filter.as_mut().map(Filter::toggle_inactive)
    }

    // Pagination transitions

    /// Change the page size
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.pagination.set_page_size(page_size);
        self.repaginate();
    }

    /// Jump to a page
    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to_page(page);
        self.repaginate();
    }

    /// One page back
    pub fn prev_page(&mut self) {
        self.pagination.go_to_prev_page();
        self.repaginate();
    }

    /// One page forward
    pub fn next_page(&mut self) {
        self.pagination.go_to_next_page();
        self.repaginate();
    }

    /// First page
    pub fn first_page(&mut self) {
        self.pagination.go_to_first_page();
        self.repaginate();
    }

    /// Last page
    pub fn last_page(&mut self) {
        let len = self.filtered_items().len();
        self.pagination.go_to_last_page(len);
        self.repaginate();
    }

    // Derived getters

    /// Pages in the filtered view
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered_items().len())
    }

    /// Page selector entries
    #[must_use]
    pub fn pages(&self) -> Vec<PageLink> {
        self.pagination.pages(self.filtered_items().len())
    }

    /// Previous page number, `None` on page 1
    #[must_use]
    pub const fn prev_page_number(&self) -> Option<usize> {
        self.pagination.prev_page()
    }

    /// Next page number, `None` on the last page
    #[must_use]
    pub fn next_page_number(&self) -> Option<usize> {
        self.pagination.next_page(self.filtered_items().len())
    }

    /// Apply a filter or pagination transition
    pub fn apply(&mut self, action: ListingAction) {
        match action {
            ListingAction::Filter(FilterAction::SetFilter(query)) => self.set_filter(query),
            ListingAction::Filter(FilterAction::ToggleOrderBy) => self.toggle_order_by(),
            ListingAction::Page(PaginationAction::SetPageSize(size)) => self.set_page_size(size),
            ListingAction::Page(PaginationAction::GoToPage(page)) => self.go_to_page(page),
            ListingAction::Page(PaginationAction::PrevPage) => self.prev_page(),
            ListingAction::Page(PaginationAction::NextPage) => self.next_page(),
            ListingAction::Page(PaginationAction::FirstPage) => self.first_page(),
            ListingAction::Page(PaginationAction::LastPage) => self.last_page(),
        }
    }
}

/// Synchronous listing transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    /// Filter transition
    Filter(FilterAction),
    /// Pagination transition
    Page(PaginationAction),
}

impl From<FilterAction> for ListingAction {
    fn from(action: FilterAction) -> Self {
        Self::Filter(action)
    }
}

impl From<PaginationAction> for ListingAction {
    fn from(action: PaginationAction) -> Self {
        Self::Page(action)
    }
}

/// Reducer for [`ListingAction`]s over any [`Listing`]
///
/// Feature reducers delegate their filter and page actions here. All
/// transitions are local, so no effects are ever returned.
pub struct ListingReducer<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> ListingReducer<T> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _item: PhantomData }
    }
}

impl<T> Default for ListingReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ListingReducer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: Named + Clone> Reducer for ListingReducer<T> {
    type State = Listing<T>;
    type Action = ListingAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        state.apply(action);
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn loaded(items: Vec<String>) -> Listing<String> {
        let mut listing = Listing::filtered("projects");
        let ticket = listing.begin_fetch();
        assert!(listing.complete_fetch(ticket, items));
        listing
    }

    #[test]
    fn completion_recomputes_views() {
        let listing = loaded(names(&["b", "a", "c"]));

        assert!(!listing.is_fetching());
        assert_eq!(listing.filtered_items(), names(&["a", "b", "c"]).as_slice());
        assert_eq!(listing.page(), names(&["a", "b", "c"]).as_slice());
    }

    #[test]
    fn unfiltered_listing_pages_raw_collection() {
        let mut listing = Listing::new("contributors");
        listing.set_items(names(&["b", "a"]));

        assert!(listing.filter().is_none());
        assert_eq!(listing.page(), names(&["b", "a"]).as_slice());
        assert_eq!(listing.toggle_inactive(), None);
    }

    #[test]
    fn filter_change_repaginates() {
        let items: Vec<String> = (0..25).map(|i| format!("item {i:02}")).collect();
        let mut listing = loaded(items);
        listing.go_to_page(3);
        assert_eq!(listing.page().len(), 5);

        // Only "item 00".."item 09" match, page 3 no longer exists
        listing.set_filter("item 0");
        assert_eq!(listing.pagination().current_page(), 1);
        assert_eq!(listing.page().len(), 10);
    }

    #[test]
    fn reducer_applies_actions_without_effects() {
        let mut listing = loaded(names(&["Bob", "alice"]));
        let reducer = ListingReducer::new();

        let effects = reducer.reduce(&mut listing, FilterAction::ToggleOrderBy.into(), &());
        assert!(effects.is_empty());
        assert_eq!(listing.page(), names(&["Bob", "alice"]).as_slice());

        let _ = reducer.reduce(&mut listing, PaginationAction::LastPage.into(), &());
        assert_eq!(listing.pagination().current_page(), 1);
    }

    #[test]
    fn stale_completion_leaves_views_alone() {
        let mut listing = Listing::filtered("projects");
        let first = listing.begin_fetch();
        let second = listing.begin_fetch();

        assert!(listing.complete_fetch(second, names(&["new"])));
        assert!(!listing.complete_fetch(first, names(&["old"])));
        assert_eq!(listing.page(), names(&["new"]).as_slice());
    }
}
