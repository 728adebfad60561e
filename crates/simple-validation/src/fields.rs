// File: src/fields.rs
// Purpose: Access to other fields' current values (used by the `matches` rule)

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

/// Read access to the current value of other fields.
///
/// Values are read at evaluation time; implementations must not cache.
pub trait FieldSource: Send + Sync {
    /// Current value of the referenced field, `None` if no such field exists
    fn field_value(&self, reference: &str) -> Option<String>;
}

/// A field source with no fields
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFields;

impl FieldSource for NoFields {
    fn field_value(&self, _reference: &str) -> Option<String> {
        None
    }
}

impl FieldSource for HashMap<String, String> {
    fn field_value(&self, reference: &str) -> Option<String> {
        self.get(reference).cloned()
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field_value(&self, reference: &str) -> Option<String> {
        self.get(reference).cloned()
    }
}

/// Shared, live store of field values.
///
/// Clones share the same storage, so a host can keep one handle to write
/// user input into while a [`Validator`](crate::Validator) holds another.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current value of a field
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.remove(name)
    }
}

impl FieldSource for FieldStore {
    fn field_value(&self, reference: &str) -> Option<String> {
        self.get(reference)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for Arc<T> {
    fn field_value(&self, reference: &str) -> Option<String> {
        (**self).field_value(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_clones_share_values() {
        let store = FieldStore::new();
        let handle = store.clone();

        store.set("password", "hunter2");
        assert_eq!(handle.field_value("password").as_deref(), Some("hunter2"));

        handle.set("password", "changed");
        assert_eq!(store.get("password").as_deref(), Some("changed"));

        assert_eq!(store.remove("password").as_deref(), Some("changed"));
        assert!(handle.field_value("password").is_none());
    }

    #[test]
    fn test_map_sources() {
        let mut map = HashMap::new();
        map.insert("email".to_string(), "a@b.com".to_string());
        assert_eq!(map.field_value("email").as_deref(), Some("a@b.com"));
        assert!(map.field_value("missing").is_none());
        assert!(NoFields.field_value("email").is_none());
    }
}
