//! Pagination module: saved page, sort, filter and search state per data grid.

mod store;
mod types;

pub use store::{PaginationStore, STORAGE_KEY};
pub use types::{
    grid_id, FilterModel, ItemId, PaginationState, PaginationUpdate, SortDirection, SortModel,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
