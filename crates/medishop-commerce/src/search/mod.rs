//! Shop listing.
//!
//! Filters, sorting and pagination applied to catalog results.

mod filter;
mod query;
mod results;

pub use filter::Filter;
pub use query::{ShopQuery, SortOption, DEFAULT_PER_PAGE};
pub use results::{CartButton, ListingEntry, Pagination, ShopPage, MAX_VISIBLE_PAGES};
