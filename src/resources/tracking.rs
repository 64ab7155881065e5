//! Dirty tracking for partial updates.
//!
//! This module provides [`ChangeSet`], which keeps the data last received
//! from the service apart from the fields changed locally since. Only the
//! changed fields are sent when an entry is saved.
//!
//! # How It Works
//!
//! Reads consult the pending changes first and fall back to the loaded
//! data. Writes only ever touch the pending changes. Tracking is per
//! top-level field: editing one key of a nested object (such as
//! `custom_fields`) marks the whole object as changed, and the whole object
//! is sent.
//!
//! # Example
//!
//! ```rust
//! use aweber_api::resources::ChangeSet;
//! use serde_json::json;
//!
//! let data = json!({"name": "Joe Jones", "custom_fields": {"Color": "blue", "Walruses": ""}});
//! let mut changes = ChangeSet::new(data.as_object().unwrap().clone());
//! assert!(!changes.is_dirty());
//!
//! changes.set("name", json!("Gary Oldman"));
//! changes.get_mut("custom_fields").unwrap()["Color"] = json!("Red");
//!
//! let diff = changes.diff();
//! assert_eq!(diff["name"], "Gary Oldman");
//! assert_eq!(diff["custom_fields"], json!({"Color": "Red", "Walruses": ""}));
//!
//! // After a successful save, the changes become the data
//! changes.commit();
//! assert!(!changes.is_dirty());
//! assert_eq!(changes.get("name"), Some(&json!("Gary Oldman")));
//! ```

use serde_json::{Map, Value};

/// Loaded data plus the fields changed locally since it was loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    data: Map<String, Value>,
    diff: Map<String, Value>,
}

impl ChangeSet {
    /// Creates a clean change set over freshly loaded data.
    #[must_use]
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            diff: Map::new(),
        }
    }

    /// Returns the pending value of `field`, or its loaded value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.diff.get(field).or_else(|| self.data.get(field))
    }

    /// Records a new value for `field`.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.diff.insert(field.into(), value);
    }

    /// Returns a mutable handle to `field`, marking it as changed.
    ///
    /// The loaded value is copied into the pending changes on first access,
    /// so in-place edits of a nested object leave the loaded data untouched
    /// and the complete object is sent on save.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        if !self.diff.contains_key(field) {
            let current = self.data.get(field)?.clone();
            self.diff.insert(field.to_string(), current);
        }
        self.diff.get_mut(field)
    }

    /// Returns `true` if any field has been changed since the last load or commit.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.diff.is_empty()
    }

    /// Returns the pending changes.
    #[must_use]
    pub const fn diff(&self) -> &Map<String, Value> {
        &self.diff
    }

    /// Returns the loaded data, without pending changes.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Merges the pending changes into the data and clears them.
    pub fn commit(&mut self) {
        let diff = std::mem::take(&mut self.diff);
        self.data.extend(diff);
    }
}
