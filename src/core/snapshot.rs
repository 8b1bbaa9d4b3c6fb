//! Point-in-time view of registry state.

use serde::Serialize;
use std::collections::BTreeMap;

/// State of one registered toggleable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleState {
    /// Toggleable name
    pub name: String,
    /// Index of the active variant
    pub active: usize,
    /// Number of variants
    pub options: usize,
}

/// Serializable copy of a registry's state, taken under a single lock
/// acquisition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    /// Registered toggleables, sorted by name
    pub toggleables: Vec<ToggleState>,
    /// Activations recorded for names that are not registered yet
    pub pending: BTreeMap<String, usize>,
}

impl RegistrySnapshot {
    /// Look up a registered toggleable by name.
    pub fn get(&self, name: &str) -> Option<&ToggleState> {
        self.toggleables
            .binary_search_by(|state| state.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.toggleables[index])
    }
}
