//! # Mentorhub Collections
//!
//! Reusable state fragments that feature modules compose by embedding:
//!
//! - [`Collection`]: named record list with a fetching flag
//! - [`Filter`]: case-insensitive name query, sort direction, inactive toggle
//! - [`Pagination`]: page window over a source list
//! - [`ModelSlot`]: the current detail record
//! - [`NewModel`]: a draft record for creation forms
//! - [`Listing`]: collection + filter + pagination with derived views
//!
//! ## Example
//!
//! ```
//! use mentorhub_collections::Listing;
//!
//! let mut listing = Listing::filtered("projects");
//! let ticket = listing.begin_fetch();
//! listing.complete_fetch(ticket, vec!["Bob".to_string(), "alice".to_string()]);
//!
//! assert_eq!(listing.page(), ["alice".to_string(), "Bob".to_string()]);
//!
//! listing.set_filter("bo");
//! assert_eq!(listing.page(), ["Bob".to_string()]);
//! ```

pub mod collection;
pub mod filter;
pub mod listing;
pub mod model;
pub mod new_model;
pub mod pagination;

pub use collection::{Collection, FetchTicket, TicketIssuer};
pub use filter::{Filter, FilterAction, Named, OrderBy};
pub use listing::{Listing, ListingAction, ListingReducer};
pub use model::ModelSlot;
pub use new_model::NewModel;
pub use pagination::{DEFAULT_PAGE_SIZE, PageLink, Pagination, PaginationAction};
