//! Dirty-tracked property storage
//!
//! Holds the authoritative property snapshot of an entity together with the
//! overlay of changes made since the last commit. The overlay is what the
//! update compiler turns into `SET`/`REMOVE` clauses.

use super::property::{PropertyMap, PropertyValue};
use indexmap::IndexSet;

/// Property snapshot plus change overlay
///
/// A key is never in both `updated` and `removed`: the most recent call to
/// [`TrackedProperties::set`] for a key decides which side it lands on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedProperties {
    properties: PropertyMap,
    updated: PropertyMap,
    removed: IndexSet<String>,
    modified: bool,
}

impl TrackedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known snapshot with an empty overlay
    pub fn from_snapshot(properties: PropertyMap) -> Self {
        TrackedProperties {
            properties,
            ..Self::default()
        }
    }

    /// Single mutation entry point. `Some` sets the key, `None` clears it.
    pub fn set(&mut self, key: impl Into<String>, value: Option<PropertyValue>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.removed.shift_remove(&key);
                self.properties.insert(key.clone(), value.clone());
                self.updated.insert(key, value);
            }
            None => {
                self.properties.shift_remove(&key);
                self.updated.shift_remove(&key);
                self.removed.insert(key);
            }
        }
        self.modified = true;
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.set(key, Some(value.into()));
    }

    pub fn remove(&mut self, key: impl Into<String>) {
        self.set(key, None);
    }

    /// Pending update first, then the snapshot
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.updated.get(key).or_else(|| self.properties.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Current properties, pending changes included
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Keys set since the last commit, with their new values
    pub fn updated(&self) -> &PropertyMap {
        &self.updated
    }

    /// Keys cleared since the last commit
    pub fn removed(&self) -> &IndexSet<String> {
        &self.removed
    }

    /// Set by any mutation, including a relationship type change on the owner
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Whether the overlay holds anything an update statement would send
    pub fn has_pending_changes(&self) -> bool {
        !self.updated.is_empty() || !self.removed.is_empty()
    }

    /// Forget the overlay once the server has applied it
    pub fn commit(&mut self) {
        self.updated.clear();
        self.removed.clear();
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_records_update() {
        let mut props = TrackedProperties::new();
        assert!(!props.is_modified());

        props.insert("since", 2020i64);

        assert!(props.is_modified());
        assert_eq!(props.get("since").and_then(|v| v.as_integer()), Some(2020));
        assert_eq!(props.updated().len(), 1);
        assert!(props.removed().is_empty());
    }

    #[test]
    fn test_set_then_remove_is_last_write_wins() {
        let mut props = TrackedProperties::new();
        props.insert("weight", 1i64);
        props.remove("weight");

        assert!(props.properties().get("weight").is_none());
        assert!(props.updated().get("weight").is_none());
        assert!(props.removed().contains("weight"));
        assert!(props.get("weight").is_none());
    }

    #[test]
    fn test_remove_then_set_clears_removal() {
        let mut props = TrackedProperties::from_snapshot(
            [("weight".to_string(), PropertyValue::Integer(1))].into_iter().collect(),
        );
        props.remove("weight");
        props.insert("weight", 2i64);

        assert!(!props.removed().contains("weight"));
        assert_eq!(props.get("weight"), Some(&PropertyValue::Integer(2)));
    }

    #[test]
    fn test_snapshot_is_clean() {
        let mut snapshot = PropertyMap::new();
        snapshot.insert("name".to_string(), "x".into());
        let props = TrackedProperties::from_snapshot(snapshot);

        assert!(!props.is_modified());
        assert!(!props.has_pending_changes());
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_commit_clears_overlay_only() {
        let mut props = TrackedProperties::new();
        props.insert("a", 1i64);
        props.remove("b");
        props.commit();

        assert!(!props.has_pending_changes());
        assert!(!props.is_modified());
        assert_eq!(props.get("a"), Some(&PropertyValue::Integer(1)));
    }

    #[test]
    fn test_overwrite_keeps_latest_value() {
        let mut props = TrackedProperties::new();
        props.insert("a", 1i64);
        props.insert("a", 2i64);

        assert_eq!(props.updated().get("a"), Some(&PropertyValue::Integer(2)));
        assert_eq!(props.properties().get("a"), Some(&PropertyValue::Integer(2)));
    }
}
