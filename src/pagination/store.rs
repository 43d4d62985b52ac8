//! Persistent store of data grid states

use indexmap::IndexMap;

use super::types::{PaginationState, PaginationUpdate};
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Key the grid states are saved under
pub const STORAGE_KEY: &str = "pagination-states";

/// Keeps each data grid's page, sort, filter and search state across navigation
///
/// State lives in memory and is written through to the injected
/// [`KeyValueStore`] on every change. Call [`PaginationStore::load`] once at
/// startup to restore what was saved.
///
/// # Examples
///
/// ```
/// use route_authz::{MemoryStore, PaginationStore, PaginationUpdate};
///
/// let backend = MemoryStore::new();
/// let mut grids = PaginationStore::new(backend.clone());
/// grids.set("users-grid", PaginationUpdate::page(2)).unwrap();
///
/// let mut restored = PaginationStore::new(backend);
/// restored.load().unwrap();
/// assert_eq!(restored.get("users-grid").page, 2);
/// ```
#[derive(Debug)]
pub struct PaginationStore<S: KeyValueStore> {
    store: S,
    states: IndexMap<String, PaginationState>,
}

impl<S: KeyValueStore> PaginationStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            states: IndexMap::new(),
        }
    }

    /// Replaces in-memory state with what the backend holds
    ///
    /// Unreadable saved state is logged and discarded; the grids fall back to
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `NavError::Storage` if the backend read fails.
    pub fn load(&mut self) -> Result<()> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            self.states.clear();
            return Ok(());
        };

        match serde_json::from_str::<IndexMap<String, PaginationState>>(&raw) {
            Ok(states) => {
                tracing::debug!(grids = states.len(), "loaded pagination states");
                self.states = states;
            }
            Err(err) => {
                tracing::error!(error = %err, "discarding unreadable pagination states");
                self.states.clear();
            }
        }

        Ok(())
    }

    /// Writes all grid states to the backend
    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.states)?;
        self.store.set(STORAGE_KEY, &raw)?;
        Ok(())
    }

    /// State of `grid_id`, or the default state if nothing was saved
    pub fn get(&self, grid_id: &str) -> PaginationState {
        self.states.get(grid_id).cloned().unwrap_or_default()
    }

    /// Merges `update` over the grid's current (or default) state and saves
    pub fn set(&mut self, grid_id: &str, update: PaginationUpdate) -> Result<&PaginationState> {
        self.states
            .entry(grid_id.to_string())
            .or_default()
            .apply(update);
        self.save()?;
        Ok(&self.states[grid_id])
    }

    /// Forgets the saved state of `grid_id`
    pub fn reset(&mut self, grid_id: &str) -> Result<()> {
        if self.states.shift_remove(grid_id).is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// Forgets every saved grid state
    pub fn reset_all(&mut self) -> Result<()> {
        self.states.clear();
        self.save()
    }

    /// Ids of grids with saved state, in first-touched order
    pub fn grid_ids(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }
}
