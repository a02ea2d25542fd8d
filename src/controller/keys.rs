//! Scoped global key listeners.
//!
//! A UI state that wants a global key (Escape while the detail view is open,
//! Enter while the search input is mounted) holds a [`Subscription`]. Dropping
//! the subscription detaches the listener, so listeners live exactly as long
//! as the state that owns them and never pile up across open/close cycles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    Enter,
    Escape,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: Vec<(u64, Hotkey)>,
}

/// Set of currently attached global key listeners
#[derive(Debug, Default)]
pub struct KeyListeners {
    registry: Rc<RefCell<Registry>>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener for `key`; it stays attached until the subscription is dropped
    pub fn subscribe(&self, key: Hotkey) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.active.push((id, key));
        Subscription { id, key, registry: Rc::downgrade(&self.registry) }
    }

    pub fn is_listening(&self, key: Hotkey) -> bool {
        self.listener_count(key) > 0
    }

    pub fn listener_count(&self, key: Hotkey) -> usize {
        self.registry.borrow().active.iter().filter(|(_, k)| *k == key).count()
    }
}

/// Handle for an attached listener. Detaches on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    key: Hotkey,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn key(&self) -> Hotkey {
        self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.retain(|(id, _)| *id != self.id);
        }
    }
}
