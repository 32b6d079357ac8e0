use {
    ahash::RandomState,
    indexmap::IndexMap,
    std::{
        cell::{RefCell, RefMut},
        hash::Hash,
        mem,
    },
};

/// A map with interior mutability that hands out clones of its values.
///
/// Iteration follows insertion order.
pub struct CopyHashMap<K, V> {
    map: RefCell<IndexMap<K, V, RandomState>>,
}

impl<K, V> Default for CopyHashMap<K, V> {
    fn default() -> Self {
        Self {
            map: Default::default(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> CopyHashMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, k: K, v: V) {
        self.map.borrow_mut().insert(k, v);
    }

    pub fn get(&self, k: &K) -> Option<V> {
        self.map.borrow().get(k).cloned()
    }

    pub fn remove(&self, k: &K) -> Option<V> {
        self.map.borrow_mut().shift_remove(k)
    }

    pub fn contains(&self, k: &K) -> bool {
        self.map.borrow().contains_key(k)
    }

    pub fn not_contains(&self, k: &K) -> bool {
        !self.contains(k)
    }

    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }

    pub fn lock(&self) -> RefMut<'_, IndexMap<K, V, RandomState>> {
        self.map.borrow_mut()
    }

    /// Returns a snapshot of the values so that callers may mutate the map while iterating.
    pub fn values(&self) -> Vec<V> {
        self.map.borrow().values().cloned().collect()
    }

    pub fn take(&self) -> Vec<V> {
        let map = mem::take(&mut *self.map.borrow_mut());
        map.into_values().collect()
    }

    pub fn clear(&self) {
        let _values = self.take();
    }
}
