//! UI preference blobs kept next to the collection
//!
//! These live under their own keys in the same backend and never touch the
//! record collection. Failures are logged and swallowed: a lost preference
//! only means the page opens with defaults.

use crate::config::StoreConfig;
use crate::core::service::KeyValueBackend;
use crate::core::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the user left the listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default = "first_page")]
    pub current_page: usize,

    #[serde(
        default,
        with = "timestamp::iso_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_at: Option<DateTime<Utc>>,
}

fn first_page() -> usize {
    1
}

/// Sort choice and session state storage
#[derive(Clone)]
pub struct Preferences {
    backend: Arc<dyn KeyValueBackend>,
    sort_key: String,
    session_key: String,
}

impl Preferences {
    pub fn new(backend: Arc<dyn KeyValueBackend>, config: &StoreConfig) -> Self {
        Self {
            backend,
            sort_key: config.sort_preference_key.clone(),
            session_key: config.session_state_key.clone(),
        }
    }

    pub fn save_sort_preference(&self, sort_by: &str) -> bool {
        match self.backend.set(&self.sort_key, sort_by) {
            Ok(()) => {
                tracing::debug!(sort_by, "sort preference saved");
                true
            }
            Err(error) => {
                tracing::error!(%error, "failed to save sort preference");
                false
            }
        }
    }

    pub fn load_sort_preference(&self) -> Option<String> {
        match self.backend.get(&self.sort_key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(error) => {
                tracing::error!(%error, "failed to load sort preference");
                None
            }
        }
    }

    /// Remember `current_page`, stamped with the current time
    pub fn save_session(&self, current_page: usize) -> bool {
        let state = SessionState {
            current_page: current_page.max(1),
            saved_at: Some(Utc::now()),
        };

        let result = serde_json::to_string(&state)
            .map_err(crate::core::error::StorageError::from)
            .and_then(|blob| self.backend.set(&self.session_key, &blob));

        match result {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(%error, "failed to save session state");
                false
            }
        }
    }

    pub fn load_session(&self) -> Option<SessionState> {
        let blob = match self.backend.get(&self.session_key) {
            Ok(blob) => blob?,
            Err(error) => {
                tracing::error!(%error, "failed to load session state");
                return None;
            }
        };

        match serde_json::from_str::<SessionState>(&blob) {
            Ok(mut state) => {
                state.current_page = state.current_page.max(1);
                Some(state)
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable session state");
                None
            }
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("backend", &self.backend.name())
            .field("sort_key", &self.sort_key)
            .field("session_key", &self.session_key)
            .finish()
    }
}
