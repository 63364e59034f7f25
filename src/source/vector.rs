//! Queryable feature store (the host's vector source shape).
//!
//! Unlike [`FeatureCollection`](super::FeatureCollection), a vector source
//! does not announce individual edits to the table; it fires `loadend` once
//! a batch of features has been loaded, plus `clear` when emptied.

use crate::event::{ListenerKey, Listeners};
use crate::feature::{FeatureKey, Record};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Event emitted by a [`VectorSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEvent {
    /// A load finished; carries the number of features added by it.
    LoadEnd { added: usize },
    Clear,
}

/// Keyed feature store with load notifications.
#[derive(Debug, Default)]
pub struct VectorSource {
    features: RefCell<IndexMap<FeatureKey, Record>>,
    listeners: Listeners<SourceEvent>,
}

impl VectorSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Adds a batch of features and emits a single `loadend`.
    pub fn add_features(&self, features: impl IntoIterator<Item = Record>) {
        let added = {
            let mut store = self.features.borrow_mut();
            let before = store.len();
            for feature in features {
                store.insert(feature.key(), feature);
            }
            store.len() - before
        };
        self.listeners.emit(&SourceEvent::LoadEnd { added });
    }

    /// Removes a feature silently, without notifying listeners.
    ///
    /// Matches the host store, where single removals are not a load event.
    pub fn remove_feature(&self, feature: &Record) -> bool {
        self.features.borrow_mut().shift_remove(&feature.key()).is_some()
    }

    pub fn contains(&self, key: FeatureKey) -> bool {
        self.features.borrow().contains_key(&key)
    }

    /// Drops every feature and emits `clear`.
    pub fn clear(&self) {
        self.features.borrow_mut().clear();
        self.listeners.emit(&SourceEvent::Clear);
    }

    /// Snapshot of the stored features in insertion order.
    pub fn get_features(&self) -> Vec<Record> {
        self.features.borrow().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.features.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.borrow().is_empty()
    }

    pub fn on(&self, callback: impl FnMut(&SourceEvent) + 'static) -> ListenerKey {
        self.listeners.add(callback)
    }

    pub fn un(&self, key: ListenerKey) -> bool {
        self.listeners.remove(key)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_batch_add_fires_one_loadend() {
        let source = VectorSource::new();
        let loads = Rc::new(Cell::new(0));
        let l = Rc::clone(&loads);
        source.on(move |event| {
            if let SourceEvent::LoadEnd { added } = event {
                assert_eq!(*added, 3);
                l.set(l.get() + 1);
            }
        });
        source.add_features((0..3).map(|i| Feature::from_json(json!({"i": i}))));
        assert_eq!(loads.get(), 1);
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_remove_is_silent() {
        let source = VectorSource::new();
        let f = Feature::from_json(json!({}));
        source.add_features([Rc::clone(&f)]);
        let events = Rc::new(Cell::new(0));
        let e = Rc::clone(&events);
        source.on(move |_| e.set(e.get() + 1));
        assert!(source.remove_feature(&f));
        assert!(!source.contains(f.key()));
        assert_eq!(events.get(), 0);
    }
}
