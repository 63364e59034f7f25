//! Record store adapter.
//!
//! Normalizes the container shapes a host can hand the table into one
//! interface: [`StoreAdapter::list`] for the current records and a change
//! channel drained with [`StoreAdapter::drain_changes`]. Nothing outside this
//! module branches on which shape is bound.

use super::collection::FeatureCollection;
use super::vector::VectorSource;
use crate::event::ListenerKey;
use crate::feature::{FeatureKey, Record};
use crate::host::HostContext;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Instant;

/// What happened in the bound store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChangeKind {
    Add,
    Remove,
    Reload,
}

/// A store notification stamped with the host clock at emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: StoreChangeKind,
    pub at: Instant,
}

/// Sending half of the adapter's change channel, handed to store listeners.
#[derive(Clone)]
pub struct ChangeNotifier {
    sender: Sender<StoreChange>,
    host: Rc<dyn HostContext>,
}

impl ChangeNotifier {
    pub fn notify(&self, kind: StoreChangeKind) {
        // The receiver only disappears once the adapter is gone.
        let _ = self.sender.send(StoreChange {
            kind,
            at: self.host.now(),
        });
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier").finish_non_exhaustive()
    }
}

/// Any other record container.
///
/// Both capabilities are optional; an implementation exposing neither binds
/// as an empty static list.
pub trait RecordProvider {
    /// Current records in display order, or `None` if the container cannot
    /// be enumerated.
    fn snapshot(&self) -> Option<Vec<Record>> {
        None
    }

    /// Subscribes to changes. Returns `None` if the container is not observable.
    fn watch(&self, _notifier: ChangeNotifier) -> Option<ListenerKey> {
        None
    }

    fn unwatch(&self, _key: ListenerKey) {}
}

/// The record containers a table can be bound to.
#[derive(Clone)]
pub enum RecordSource {
    /// Plain ordered list, re-read on every refresh but never observed.
    List(Rc<RefCell<Vec<Record>>>),
    /// Observable collection (`add` / `remove`).
    Collection(Rc<FeatureCollection>),
    /// Queryable store (`loadend` / `clear`).
    Store(Rc<VectorSource>),
    Custom(Rc<dyn RecordProvider>),
}

impl RecordSource {
    pub fn from_vec(records: Vec<Record>) -> Self {
        RecordSource::List(Rc::new(RefCell::new(records)))
    }

    fn shape(&self) -> &'static str {
        match self {
            RecordSource::List(_) => "list",
            RecordSource::Collection(_) => "collection",
            RecordSource::Store(_) => "store",
            RecordSource::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordSource::{}", self.shape())
    }
}

impl From<Vec<Record>> for RecordSource {
    fn from(records: Vec<Record>) -> Self {
        RecordSource::from_vec(records)
    }
}

impl From<Rc<FeatureCollection>> for RecordSource {
    fn from(collection: Rc<FeatureCollection>) -> Self {
        RecordSource::Collection(collection)
    }
}

impl From<Rc<VectorSource>> for RecordSource {
    fn from(source: Rc<VectorSource>) -> Self {
        RecordSource::Store(source)
    }
}

/// What the bound source supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCapabilities {
    /// Records can be read back on every refresh.
    pub enumerable: bool,
    /// The source notifies the table about changes.
    pub live: bool,
}

impl SourceCapabilities {
    pub fn is_static(&self) -> bool {
        !self.live
    }
}

enum Binding {
    List(Rc<RefCell<Vec<Record>>>),
    Collection {
        collection: Rc<FeatureCollection>,
        key: ListenerKey,
    },
    Store {
        store: Rc<VectorSource>,
        key: ListenerKey,
    },
    Custom {
        provider: Rc<dyn RecordProvider>,
        key: Option<ListenerKey>,
    },
    /// One-shot snapshot for sources that cannot be enumerated.
    Static(Vec<Record>),
}

/// A live subscription to one record source.
pub struct StoreAdapter {
    binding: Option<Binding>,
    receiver: Receiver<StoreChange>,
    capabilities: SourceCapabilities,
}

impl StoreAdapter {
    /// Subscribes to `source`.
    pub fn attach(source: RecordSource, host: Rc<dyn HostContext>) -> Self {
        let (sender, receiver) = channel();
        let notifier = ChangeNotifier { sender, host };
        let shape = source.shape();

        let (binding, capabilities) = match source {
            RecordSource::List(list) => (
                Binding::List(list),
                SourceCapabilities { enumerable: true, live: false },
            ),
            RecordSource::Collection(collection) => {
                let n = notifier.clone();
                let key = collection.on(move |event| {
                    let kind = match event {
                        super::CollectionEvent::Add(_) => StoreChangeKind::Add,
                        super::CollectionEvent::Remove(_) => StoreChangeKind::Remove,
                    };
                    n.notify(kind);
                });
                (
                    Binding::Collection { collection, key },
                    SourceCapabilities { enumerable: true, live: true },
                )
            }
            RecordSource::Store(store) => {
                let n = notifier.clone();
                let key = store.on(move |_| n.notify(StoreChangeKind::Reload));
                (
                    Binding::Store { store, key },
                    SourceCapabilities { enumerable: true, live: true },
                )
            }
            RecordSource::Custom(provider) => match provider.snapshot() {
                Some(_) => {
                    let key = provider.watch(notifier.clone());
                    let live = key.is_some();
                    (
                        Binding::Custom { provider, key },
                        SourceCapabilities { enumerable: true, live },
                    )
                }
                None => {
                    // A watch without enumeration would only ever refresh an empty list.
                    (
                        Binding::Static(Vec::new()),
                        SourceCapabilities { enumerable: false, live: false },
                    )
                }
            },
        };

        if capabilities.is_static() {
            log::warn!("record source ({shape}) is not observable; binding as a static list");
        } else {
            log::debug!("attached to live record source ({shape})");
        }

        Self {
            binding: Some(binding),
            receiver,
            capabilities,
        }
    }

    pub fn capabilities(&self) -> SourceCapabilities {
        self.capabilities
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// Current records, in the order the source holds them.
    pub fn list(&self) -> Vec<Record> {
        match &self.binding {
            Some(Binding::List(list)) => list.borrow().clone(),
            Some(Binding::Collection { collection, .. }) => collection.get_array(),
            Some(Binding::Store { store, .. }) => store.get_features(),
            Some(Binding::Custom { provider, .. }) => provider.snapshot().unwrap_or_default(),
            Some(Binding::Static(records)) => records.clone(),
            None => Vec::new(),
        }
    }

    /// The subset of `keys` the source still holds.
    ///
    /// Stores and collections answer per key. Other shapes are enumerated once.
    pub fn present_keys(&self, keys: impl IntoIterator<Item = FeatureKey>) -> HashSet<FeatureKey> {
        match &self.binding {
            Some(Binding::Store { store, .. }) => keys.into_iter().filter(|k| store.contains(*k)).collect(),
            Some(Binding::Collection { collection, .. }) => {
                keys.into_iter().filter(|k| collection.contains(*k)).collect()
            }
            _ => {
                let wanted: HashSet<FeatureKey> = keys.into_iter().collect();
                self.list().iter().map(|r| r.key()).filter(|k| wanted.contains(k)).collect()
            }
        }
    }

    /// True if records can leave the source without a notification.
    pub fn removes_silently(&self) -> bool {
        matches!(self.binding, Some(Binding::Store { .. }))
    }

    /// Takes every notification received since the last call.
    pub fn drain_changes(&self) -> Vec<StoreChange> {
        self.receiver.try_iter().collect()
    }

    /// Unsubscribes. Safe to call repeatedly.
    pub fn detach(&mut self) {
        match self.binding.take() {
            Some(Binding::Collection { collection, key }) => {
                collection.un(key);
            }
            Some(Binding::Store { store, key }) => {
                store.un(key);
            }
            Some(Binding::Custom { provider, key: Some(key) }) => provider.unwatch(key),
            Some(_) | None => {}
        }
        // Pending notifications belong to the old subscription.
        while self.receiver.try_recv().is_ok() {}
    }
}

impl Drop for StoreAdapter {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for StoreAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreAdapter")
            .field("attached", &self.is_attached())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;
    use crate::host::ManualHost;
    use serde_json::json;

    fn host() -> Rc<dyn HostContext> {
        Rc::new(ManualHost::new(400.0))
    }

    fn features(n: usize) -> Vec<Record> {
        (0..n).map(|i| Feature::from_json(json!({"i": i}))).collect()
    }

    #[test]
    fn test_list_source_is_static() {
        let adapter = StoreAdapter::attach(RecordSource::from_vec(features(3)), host());
        assert_eq!(adapter.list().len(), 3);
        assert!(adapter.capabilities().is_static());
        assert!(adapter.capabilities().enumerable);
    }

    #[test]
    fn test_collection_changes_reach_channel() {
        let collection = FeatureCollection::with_features(features(2));
        let adapter = StoreAdapter::attach(RecordSource::Collection(Rc::clone(&collection)), host());
        assert!(adapter.capabilities().live);

        collection.push(Feature::from_json(json!({})));
        let first = collection.get_array()[0].clone();
        collection.remove(&first);

        let kinds: Vec<_> = adapter.drain_changes().into_iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![StoreChangeKind::Add, StoreChangeKind::Remove]);
        assert_eq!(adapter.list().len(), 2);
    }

    #[test]
    fn test_store_loadend_maps_to_reload() {
        let store = VectorSource::shared();
        let adapter = StoreAdapter::attach(RecordSource::Store(Rc::clone(&store)), host());
        store.add_features(features(4));
        let changes = adapter.drain_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, StoreChangeKind::Reload);
        assert_eq!(adapter.list().len(), 4);
    }

    #[test]
    fn test_present_keys_only_reports_requested_records() {
        let store = VectorSource::shared();
        let records = features(10);
        store.add_features(records.clone());
        let adapter = StoreAdapter::attach(RecordSource::Store(Rc::clone(&store)), host());
        assert!(adapter.removes_silently());

        store.remove_feature(&records[1]);
        let present = adapter.present_keys(records[..3].iter().map(|r| r.key()));
        assert_eq!(present, HashSet::from([records[0].key(), records[2].key()]));

        let list = StoreAdapter::attach(RecordSource::from_vec(records.clone()), host());
        assert!(!list.removes_silently());
        assert_eq!(list.present_keys([records[5].key()]).len(), 1);
    }

    #[test]
    fn test_detach_is_idempotent_and_unsubscribes() {
        let collection = FeatureCollection::with_features(Vec::new());
        let mut adapter = StoreAdapter::attach(RecordSource::Collection(Rc::clone(&collection)), host());
        assert_eq!(collection.listener_count(), 1);
        adapter.detach();
        adapter.detach();
        assert_eq!(collection.listener_count(), 0);
        assert!(!adapter.is_attached());
        collection.push(Feature::from_json(json!({})));
        assert!(adapter.drain_changes().is_empty());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = VectorSource::shared();
        {
            let _adapter = StoreAdapter::attach(RecordSource::Store(Rc::clone(&store)), host());
            assert_eq!(store.listener_count(), 1);
        }
        assert_eq!(store.listener_count(), 0);
    }

    struct Opaque;
    impl RecordProvider for Opaque {}

    struct Snapshot(Vec<Record>);
    impl RecordProvider for Snapshot {
        fn snapshot(&self) -> Option<Vec<Record>> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_opaque_provider_degrades_to_static_empty_list() {
        let adapter = StoreAdapter::attach(RecordSource::Custom(Rc::new(Opaque)), host());
        let caps = adapter.capabilities();
        assert!(!caps.enumerable);
        assert!(!caps.live);
        assert!(adapter.list().is_empty());
    }

    #[test]
    fn test_enumerable_provider_without_watch() {
        let adapter = StoreAdapter::attach(RecordSource::Custom(Rc::new(Snapshot(features(5)))), host());
        assert_eq!(adapter.capabilities(), SourceCapabilities { enumerable: true, live: false });
        assert_eq!(adapter.list().len(), 5);
    }
}
