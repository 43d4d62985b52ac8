//! Per-grid pagination, sorting and filtering state

use serde::{Deserialize, Serialize};

/// Page sizes a data grid offers
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];

/// Page size of a grid with no saved state
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort applied to one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortModel {
    pub field: String,
    pub sort: SortDirection,
}

/// Filter applied to one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterModel {
    pub field: String,
    pub operator: String,
    pub value: serde_json::Value,
}

/// Identifier of the selected row; grids key rows by number or string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

/// Saved state of one data grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationState {
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_item_id: Option<ItemId>,
    pub sort_model: Vec<SortModel>,
    pub filter_model: Vec<FilterModel>,
    pub search_query: String,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            selected_item_id: None,
            sort_model: Vec::new(),
            filter_model: Vec::new(),
            search_query: String::new(),
        }
    }
}

impl PaginationState {
    /// Applies the fields present in `update`
    pub fn apply(&mut self, update: PaginationUpdate) {
        if let Some(page) = update.page {
            self.page = page;
        }
        if let Some(page_size) = update.page_size {
            self.page_size = page_size;
        }
        if let Some(selected) = update.selected_item_id {
            self.selected_item_id = Some(selected);
        }
        if let Some(sort_model) = update.sort_model {
            self.sort_model = sort_model;
        }
        if let Some(filter_model) = update.filter_model {
            self.filter_model = filter_model;
        }
        if let Some(search_query) = update.search_query {
            self.search_query = search_query;
        }
    }

    /// Number of pages needed for `total_rows` (at least one)
    pub fn page_count(&self, total_rows: usize) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        total_rows.div_ceil(self.page_size).max(1)
    }

    /// The rows on the current page; empty past the last page
    pub fn page_slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.page.saturating_mul(self.page_size).min(rows.len());
        let end = start.saturating_add(self.page_size).min(rows.len());
        &rows[start..end]
    }
}

/// Partial update of a [`PaginationState`]; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationUpdate {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub selected_item_id: Option<ItemId>,
    pub sort_model: Option<Vec<SortModel>>,
    pub filter_model: Option<Vec<FilterModel>>,
    pub search_query: Option<String>,
}

impl PaginationUpdate {
    pub fn page(page: usize) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn page_size(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn sort(field: impl Into<String>, sort: SortDirection) -> Self {
        Self {
            sort_model: Some(vec![SortModel {
                field: field.into(),
                sort,
            }]),
            ..Self::default()
        }
    }
}

/// Builds a grid id from a grid category and a key, e.g. `SpecialOrder` + `ExpertList`
pub fn grid_id(category: &str, key: &str) -> String {
    format!("{}{}", category, key)
}
