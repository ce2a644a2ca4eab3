//! Per-session selection state and the two controller operations.
//!
//! State is a value: callers hold one per session and replace it with what
//! [`SelectionState::select`] returns. A rejected select returns an error
//! and the caller keeps what it had.

use serde::Serialize;

use crate::error::SelectError;
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionState {
    selected: String,
}

impl SelectionState {
    /// The default selection: the first registry entry.
    pub fn initial(registry: &Registry) -> Self {
        Self {
            selected: registry.first().name.clone(),
        }
    }

    /// Initialize a session. An existing state is returned unchanged, so
    /// calling this on an initialized session is a no-op.
    pub fn initialize(registry: &Registry, existing: Option<SelectionState>) -> Self {
        existing
            .filter(|state| registry.contains(&state.selected))
            .unwrap_or_else(|| Self::initial(registry))
    }

    /// Select `name`. Unknown names are rejected and `self` stays valid.
    pub fn select(&self, registry: &Registry, name: &str) -> Result<Self, SelectError> {
        if !registry.contains(name) {
            return Err(SelectError::UnknownAssistant {
                name: name.to_string(),
            });
        }
        Ok(Self {
            selected: name.to_string(),
        })
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected == name
    }
}
