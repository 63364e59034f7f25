//! Listener registry used by the host-side collections.
//!
//! Mirrors the host framework's `on(type, handler)` / `un(key)` model with
//! typed events instead of string event names.

use std::cell::{Cell, RefCell};
use std::fmt;

/// Handle returned by `on`, used to unregister a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// An ordered list of callbacks for one event type.
///
/// Callbacks run in registration order. A callback must not register or
/// remove listeners on the registry that is currently emitting.
pub struct Listeners<E> {
    next_key: Cell<u64>,
    callbacks: RefCell<Vec<(ListenerKey, Callback<E>)>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_key: Cell::new(1),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    /// Registers a callback and returns its key.
    pub fn add(&self, callback: impl FnMut(&E) + 'static) -> ListenerKey {
        let key = ListenerKey(self.next_key.get());
        self.next_key.set(key.0 + 1);
        self.callbacks.borrow_mut().push((key, Box::new(callback)));
        key
    }

    /// Removes a callback. Returns false when the key was already gone.
    pub fn remove(&self, key: ListenerKey) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(k, _)| *k != key);
        callbacks.len() != before
    }

    /// Invokes every callback with the event.
    pub fn emit(&self, event: &E) {
        for (_, callback) in self.callbacks.borrow_mut().iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.borrow().is_empty()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let listeners: Listeners<u32> = Listeners::new();

        let l1 = Rc::clone(&log);
        listeners.add(move |e| l1.borrow_mut().push(("first", *e)));
        let l2 = Rc::clone(&log);
        listeners.add(move |e| l2.borrow_mut().push(("second", *e)));

        listeners.emit(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let listeners: Listeners<()> = Listeners::new();
        let key = listeners.add(|_| {});
        assert!(listeners.remove(key));
        assert!(!listeners.remove(key));
        assert!(listeners.is_empty());
    }
}
