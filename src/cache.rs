//! Get-or-create memo for styled instances produced by a binder.

use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;

/// Memo of produced instances keyed by template text.
///
/// Entries are never evicted; the cache lives as long as the binder owning
/// it. Rendering is single-threaded so interior mutability through `RefCell`
/// is enough.
#[derive(Debug)]
pub struct InstanceCache<V> {
    entries: RefCell<HashMap<String, V>>,
}

impl<V: Clone> InstanceCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Return the instance cached under `key`, building and storing it first
    /// if absent
    pub fn get_or_create<F>(&self, key: &str, create: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(existing) = self.entries.borrow().get(key) {
            debug!("instance cache hit for '{}'", key);
            return existing.clone();
        }

        debug!("instance cache miss for '{}'", key);
        // `create` runs without holding a borrow so it may touch other caches
        let created = create();
        self.entries
            .borrow_mut()
            .entry(key.to_string())
            .or_insert(created)
            .clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<V: Clone> Default for InstanceCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
