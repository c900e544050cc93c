//! Application state management.
//!
//! Long-lived state lives here: the dataset, display settings, and the
//! selection. Transient map interaction state (hover, zoom) is owned by the
//! map renderer instead.

mod selection;
mod settings;

pub use selection::{SelectionSet, ToggleOutcome};
pub use settings::{SortOrder, ViewSettings, THEME_COLORS};

use crate::data::Dataset;
use std::sync::Arc;

/// Root application state.
pub struct AppState {
    /// Reference dataset, shared with the map by pointer identity
    pub dataset: Arc<Dataset>,

    /// Display settings from the control panel
    pub settings: ViewSettings,

    /// Selected states, oldest first
    pub selection: SelectionSet,

    /// Map status line (loading / error)
    pub status_message: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Dataset::us_2024())
    }
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            settings: ViewSettings::default(),
            selection: SelectionSet::new(),
            status_message: "Loading map...".to_string(),
        }
    }

    /// Toggles a state in the selection, logging evictions.
    pub fn toggle_selection(&mut self, name: &str) {
        match self.selection.toggle(name) {
            ToggleOutcome::Added => log::debug!("Selected {}", name),
            ToggleOutcome::Removed => log::debug!("Deselected {}", name),
            ToggleOutcome::AddedEvicting(old) => {
                log::debug!("Selected {}, evicted {}", name, old)
            }
        }
    }
}
