//! Persisted filter state.
//!
//! The last entered field values survive restarts together with an
//! `applied` flag recording whether a search was ever explicitly run.
//! The flag decides whether a new session re-runs the search on startup.

mod settings;

pub use settings::{JsonFileSettings, MemorySettings, SettingsStore};

use crate::error::ArchiveError;
use crate::search::FieldInputs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Settings key the filter state is stored under.
pub const FILTER_STATE_KEY: &str = "chatsort.filterState";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub fields: FieldInputs,
    pub applied: bool,
}

/// Reads and writes [`FilterState`] through a [`SettingsStore`].
///
/// Storage problems never surface: reads fall back to the default state
/// and failed writes are logged and dropped.
pub struct FilterStateStore {
    settings: Box<dyn SettingsStore>,
    key: String,
}

impl FilterStateStore {
    pub fn new(settings: Box<dyn SettingsStore>) -> Self {
        Self {
            settings,
            key: FILTER_STATE_KEY.to_string(),
        }
    }

    /// Load the saved state, or the default if none is readable.
    pub fn load(&self) -> FilterState {
        let blob = match self.settings.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return FilterState::default(),
            Err(e) => {
                warn!("filter state unavailable, using defaults: {}", e);
                return FilterState::default();
            }
        };

        serde_json::from_str(&blob).unwrap_or_else(|e| {
            warn!("discarding unreadable filter state: {}", e);
            FilterState::default()
        })
    }

    /// Record field values. `applied` only ever moves from false to true here.
    pub fn save(&self, fields: &FieldInputs, mark_applied: bool) -> FilterState {
        let previous = self.load();
        let state = FilterState {
            fields: fields.clone(),
            applied: previous.applied || mark_applied,
        };
        self.persist(&state);
        state
    }

    /// Record values from a keystroke, keeping the `applied` flag as is.
    pub fn record_keystroke(&self, fields: &FieldInputs) -> FilterState {
        self.save(fields, false)
    }

    /// Forget everything, including the `applied` flag.
    pub fn clear(&self) -> FilterState {
        let state = FilterState::default();
        self.persist(&state);
        state
    }

    fn persist(&self, state: &FilterState) {
        let result = serde_json::to_string(state)
            .map_err(ArchiveError::from)
            .and_then(|blob| self.settings.set(&self.key, &blob));
        match result {
            Ok(()) => debug!(applied = state.applied, "saved filter state"),
            Err(e) => warn!("could not save filter state: {}", e),
        }
    }
}
