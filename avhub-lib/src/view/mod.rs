//! Client-side table pipeline: filter, sort, paginate, render.
//!
//! # Pipeline
//!
//! - [`FilterSet`] narrows a row set (or becomes query parameters)
//! - [`SortState`] orders it with a stable comparison
//! - [`PageState`] slices the ordered rows into pages
//! - [`TableView`] owns sort and page state for one view and renders
//!   [`RenderedTable`] pages from [`Column`] descriptors
//!
//! The free functions [`compute_ordered_rows`] and [`compute_page`] are the
//! pure building blocks `TableView` is made of.

mod column;
mod filter;
mod page;
mod render;
mod sort;
mod table;

pub use column::Cell;
pub use column::Column;
pub use column::PLACEHOLDER;
pub use column::Renderer;
pub use filter::FilterField;
pub use filter::FilterSet;
pub use filter::FilterSpec;
pub use page::DEFAULT_PAGE_SIZE;
pub use page::Page;
pub use page::PageState;
pub use page::compute_page;
pub use page::total_pages;
pub use render::Body;
pub use render::ClickOutcome;
pub use render::ClickTarget;
pub use render::DEFAULT_EMPTY_MESSAGE;
pub use render::HeaderCell;
pub use render::Pager;
pub use render::RenderedRow;
pub use render::RenderedTable;
pub use render::RowKey;
pub use sort::Direction;
pub use sort::SortState;
pub use sort::compare_values;
pub use sort::compute_ordered_rows;
pub use sort::order_indices;
pub use table::DEFAULT_IDENTITY_FIELD;
pub use table::RowHandler;
pub use table::TableView;
