
use {
    crate::utils::numcell::NumCell,
    std::{
        cell::RefCell,
        mem,
        rc::{Rc, Weak},
    },
};

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct ListenerId(u64);

/// A list of weakly held listeners.
///
/// Listeners that have been dropped are skipped and pruned lazily.
pub struct EventSource<T: ?Sized> {
    next_id: NumCell<u64>,
    listeners: RefCell<Vec<(ListenerId, Weak<T>)>>,
}

impl<T: ?Sized> Default for EventSource<T> {
    fn default() -> Self {
        Self {
            next_id: NumCell::new(1),
            listeners: Default::default(),
        }
    }
}

impl<T: ?Sized> EventSource<T> {
    pub fn attach(&self, listener: Weak<T>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1));
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|(_, l)| l.strong_count() > 0);
        listeners.push((id, listener));
        id
    }

    pub fn detach(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(l, _)| *l != id);
    }

    pub fn has_listeners(&self) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(_, l)| l.strong_count() > 0)
    }

    /// Returns the live listeners in the order in which they were attached.
    pub fn iter(&self) -> Vec<Rc<T>> {
        self.listeners
            .borrow()
            .iter()
            .filter_map(|(_, l)| l.upgrade())
            .collect()
    }

    /// Detaches all listeners and returns the live ones.
    pub fn take(&self) -> Vec<Rc<T>> {
        let listeners = mem::take(&mut *self.listeners.borrow_mut());
        listeners.into_iter().filter_map(|(_, l)| l.upgrade()).collect()
    }
}
