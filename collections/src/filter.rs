//! Client-side filtering by display name

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Records that can be filtered and sorted by a display name
pub trait Named {
    /// Display name matched by the filter query
    fn name(&self) -> &str;
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

/// Sort direction of the filtered view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderBy {
    /// A to Z
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Z to A
    #[serde(rename = "desc")]
    Descending,
}

impl OrderBy {
    /// The other direction
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orient an ascending comparison
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Filter inputs: query, sort direction and the inactive toggle
///
/// `showing_inactive` does not filter anything client-side. It selects
/// which server endpoint the owning feature fetches from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    query: String,
    order_by: OrderBy,
    showing_inactive: bool,
}

impl Filter {
    /// Empty query, ascending, active records only
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current sort direction
    #[must_use]
    pub const fn order_by(&self) -> OrderBy {
        self.order_by
    }

    /// Whether inactive records are requested
    #[must_use]
    pub const fn showing_inactive(&self) -> bool {
        self.showing_inactive
    }

    /// Replace the query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Flip the sort direction
    pub const fn toggle_order_by(&mut self) {
        self.order_by = self.order_by.toggled();
    }

    /// Flip the inactive toggle and return the new value
    pub const fn toggle_inactive(&mut self) -> bool {
        self.showing_inactive = !self.showing_inactive;
        self.showing_inactive
    }

    /// Whether `item` matches the query (case-insensitive substring)
    #[must_use]
    pub fn matches<T: Named>(&self, item: &T) -> bool {
        item.name().to_lowercase().contains(&self.query.to_lowercase())
    }

    /// Compute the filtered view of `items`
    ///
    /// Keeps the matching items in their original order, then stable-sorts
    /// them by lowercased name in the current direction.
    #[must_use]
    pub fn apply<T: Named + Clone>(&self, items: &[T]) -> Vec<T> {
        let needle = self.query.to_lowercase();
        let mut keyed: Vec<(String, &T)> = items
            .iter()
            .map(|item| (item.name().to_lowercase(), item))
            .filter(|(name, _)| name.contains(&needle))
            .collect();

        let order_by = self.order_by;
        keyed.sort_by(|(a, _), (b, _)| order_by.apply(a.cmp(b)));

        keyed.into_iter().map(|(_, item)| item.clone()).collect()
    }
}

/// Filter transitions shared by every filtered listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Replace the query
    SetFilter(String),
    /// Flip asc/desc
    ToggleOrderBy,
}
