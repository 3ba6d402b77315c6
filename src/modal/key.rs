use crate::modal::ModalAction;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Accepts `KeyboardEvent.key` names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Document-wide key observers.
#[derive(Clone, Debug, Default)]
pub struct Document {
    listeners: Rc<RefCell<Listeners>>,
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    id: u64,
    key: Key,
    action: ModalAction,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The listener stays registered until the returned guard is dropped.
    #[must_use = "dropping the guard removes the listener"]
    pub fn on_key_down(&self, key: Key, action: ModalAction) -> KeyListener {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push(Entry { id, key, action });
        KeyListener {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Actions of every listener registered for `key`, in registration order.
    pub fn key_down(&self, key: &Key) -> Vec<ModalAction> {
        self.listeners
            .borrow()
            .entries
            .iter()
            .filter(|entry| &entry.key == key)
            .map(|entry| entry.action.clone())
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

#[derive(Debug)]
pub struct KeyListener {
    listeners: Weak<RefCell<Listeners>>,
    id: u64,
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|entry| entry.id != self.id);
        }
    }
}
