//! Records: shared, observable property bags with instance identity.
//!
//! A [`Feature`] is the record type the table displays. Identity is the
//! instance, not its contents: every feature receives a process-unique
//! [`FeatureKey`] when it is created, and two features holding identical
//! properties are still distinct records.

use serde_json::{Map, Value};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Property name under which the host framework stores a feature's geometry.
pub const GEOMETRY_PROPERTY: &str = "geometry";

static NEXT_FEATURE_KEY: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a [`Feature`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureKey(u64);

impl FeatureKey {
    fn next() -> Self {
        FeatureKey(NEXT_FEATURE_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw serial number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared handle to a feature. The table only ever clones handles.
pub type Record = Rc<Feature>;

/// A map feature: an ordered set of named properties.
///
/// Properties live behind a `RefCell` so the owning store can edit values in
/// place; the table re-reads them on every materialization.
pub struct Feature {
    key: FeatureKey,
    properties: RefCell<Map<String, Value>>,
}

impl Feature {
    /// Creates a feature from an ordered property map.
    pub fn new(properties: Map<String, Value>) -> Self {
        Self {
            key: FeatureKey::next(),
            properties: RefCell::new(properties),
        }
    }

    /// Creates a feature and wraps it in a shared [`Record`] handle.
    pub fn record(properties: Map<String, Value>) -> Record {
        Rc::new(Self::new(properties))
    }

    /// Creates a record from a JSON object value. Non-object values yield an
    /// empty feature.
    pub fn from_json(value: Value) -> Record {
        match value {
            Value::Object(map) => Self::record(map),
            _ => Self::record(Map::new()),
        }
    }

    pub fn key(&self) -> FeatureKey {
        self.key
    }

    /// Returns a copy of the named property, if present.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.properties.borrow().get(name).cloned()
    }

    /// Sets a property value. Used by the owning store, never by the table.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.properties.borrow_mut().insert(name.into(), value);
    }

    /// Removes a property, returning its previous value.
    pub fn unset(&self, name: &str) -> Option<Value> {
        self.properties.borrow_mut().shift_remove(name)
    }

    /// Property names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.properties.borrow().keys().cloned().collect()
    }

    /// Borrows the full property map.
    pub fn properties(&self) -> Ref<'_, Map<String, Value>> {
        self.properties.borrow()
    }

    /// Returns the geometry value, if the feature has one.
    pub fn geometry(&self) -> Option<Value> {
        self.get(GEOMETRY_PROPERTY)
    }
}

impl fmt::Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("key", &self.key)
            .field("properties", &*self.properties.borrow())
            .finish()
    }
}

/// Returns true for values the table can display in a cell.
///
/// Objects and arrays are nested data or geometries and never become columns.
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identical_properties_are_distinct_records() {
        let a = Feature::from_json(json!({"name": "Oslo"}));
        let b = Feature::from_json(json!({"name": "Oslo"}));
        assert_ne!(a.key(), b.key());
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_keys_preserve_insertion_order() {
        let f = Feature::from_json(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        assert_eq!(f.keys(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_set_and_unset() {
        let f = Feature::from_json(json!({"a": 1}));
        f.set("b", json!("x"));
        assert_eq!(f.get("b"), Some(json!("x")));
        assert_eq!(f.unset("a"), Some(json!(1)));
        assert_eq!(f.keys(), vec!["b"]);
    }

    #[test]
    fn test_scalar_detection() {
        assert!(is_scalar(&json!("s")));
        assert!(is_scalar(&json!(1.5)));
        assert!(is_scalar(&json!(null)));
        assert!(!is_scalar(&json!({"type": "Point", "coordinates": [0, 0]})));
        assert!(!is_scalar(&json!([1, 2])));
    }
}
