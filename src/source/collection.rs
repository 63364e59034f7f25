//! Observable, mutable feature collection (the host's `Collection` shape).

use crate::event::{ListenerKey, Listeners};
use crate::feature::{FeatureKey, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Event emitted by a [`FeatureCollection`].
#[derive(Debug, Clone)]
pub enum CollectionEvent {
    Add(Record),
    Remove(Record),
}

/// An ordered list of features that notifies listeners on every add/remove.
#[derive(Debug, Default)]
pub struct FeatureCollection {
    items: RefCell<Vec<Record>>,
    /// How many times each feature occurs in `items`.
    counts: RefCell<HashMap<FeatureKey, usize>>,
    listeners: Listeners<CollectionEvent>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shared collection pre-filled with features (no events fired).
    pub fn with_features(features: Vec<Record>) -> Rc<Self> {
        let mut counts = HashMap::new();
        for feature in &features {
            *counts.entry(feature.key()).or_insert(0) += 1;
        }
        Rc::new(Self {
            items: RefCell::new(features),
            counts: RefCell::new(counts),
            listeners: Listeners::new(),
        })
    }

    /// Appends a feature and emits `add`.
    pub fn push(&self, feature: Record) {
        self.items.borrow_mut().push(Rc::clone(&feature));
        *self.counts.borrow_mut().entry(feature.key()).or_insert(0) += 1;
        self.listeners.emit(&CollectionEvent::Add(feature));
    }

    pub fn extend(&self, features: impl IntoIterator<Item = Record>) {
        for feature in features {
            self.push(feature);
        }
    }

    /// Removes a feature by identity and emits `remove`. Returns the removed
    /// feature, or `None` if it was not in the collection.
    pub fn remove(&self, feature: &Record) -> Option<Record> {
        let removed = {
            let mut items = self.items.borrow_mut();
            let pos = items.iter().position(|f| Rc::ptr_eq(f, feature))?;
            items.remove(pos)
        };
        {
            let mut counts = self.counts.borrow_mut();
            if let Some(count) = counts.get_mut(&removed.key()) {
                *count -= 1;
                if *count == 0 {
                    counts.remove(&removed.key());
                }
            }
        }
        self.listeners.emit(&CollectionEvent::Remove(Rc::clone(&removed)));
        Some(removed)
    }

    /// Removes every feature, emitting one `remove` per feature.
    pub fn clear(&self) {
        let drained: Vec<Record> = self.items.borrow_mut().drain(..).collect();
        self.counts.borrow_mut().clear();
        for feature in drained {
            self.listeners.emit(&CollectionEvent::Remove(feature));
        }
    }

    /// Snapshot of the current contents in collection order.
    pub fn get_array(&self) -> Vec<Record> {
        self.items.borrow().clone()
    }

    pub fn contains(&self, key: FeatureKey) -> bool {
        self.counts.borrow().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn on(&self, callback: impl FnMut(&CollectionEvent) + 'static) -> ListenerKey {
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
    fn test_add_and_remove_emit_events() {
        let collection = FeatureCollection::new();
        let adds = Rc::new(Cell::new(0));
        let removes = Rc::new(Cell::new(0));
        let (a, r) = (Rc::clone(&adds), Rc::clone(&removes));
        collection.on(move |event| match event {
            CollectionEvent::Add(_) => a.set(a.get() + 1),
            CollectionEvent::Remove(_) => r.set(r.get() + 1),
        });

        let f1 = Feature::from_json(json!({"name": "a"}));
        let f2 = Feature::from_json(json!({"name": "b"}));
        collection.push(Rc::clone(&f1));
        collection.push(Rc::clone(&f2));
        assert!(collection.remove(&f1).is_some());
        assert!(collection.remove(&f1).is_none());
        assert!(!collection.contains(f1.key()));
        assert!(collection.contains(f2.key()));

        assert_eq!(adds.get(), 2);
        assert_eq!(removes.get(), 1);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_clear_emits_per_feature() {
        let collection = FeatureCollection::with_features(vec![
            Feature::from_json(json!({})),
            Feature::from_json(json!({})),
        ]);
        let removes = Rc::new(Cell::new(0));
        let r = Rc::clone(&removes);
        collection.on(move |_| r.set(r.get() + 1));
        collection.clear();
        assert_eq!(removes.get(), 2);
        assert!(collection.is_empty());
    }
}
