use std::{
    cell::UnsafeCell,
    fmt::{Debug, Formatter},
    mem,
    rc::{Rc, Weak},
};

pub struct CloneCell<T: UnsafeCellCloneSafe> {
    data: UnsafeCell<T>,
}

impl<T: UnsafeCellCloneSafe> Clone for CloneCell<T> {
    fn clone(&self) -> Self {
        Self {
            data: UnsafeCell::new(self.get()),
        }
    }
}

impl<T: UnsafeCellCloneSafe + Debug> Debug for CloneCell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: UnsafeCellCloneSafe> CloneCell<T> {
    pub const fn new(t: T) -> Self {
        Self {
            data: UnsafeCell::new(t),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> T {
        // SAFETY: UnsafeCellCloneSafe guarantees that clone cannot access this cell.
        unsafe { (*self.data.get()).clone() }
    }

    #[inline(always)]
    pub fn set(&self, t: T) -> T {
        // SAFETY: no references into the cell ever escape.
        unsafe { mem::replace(&mut *self.data.get(), t) }
    }

    #[inline(always)]
    pub fn take(&self) -> T
    where
        T: Default,
    {
        // SAFETY: no references into the cell ever escape.
        unsafe { mem::take(&mut *self.data.get()) }
    }
}

impl<T: UnsafeCellCloneSafe> CloneCell<Option<T>> {
    pub fn is_some(&self) -> bool {
        // SAFETY: the reference does not outlive this function.
        unsafe { (*self.data.get()).is_some() }
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}

impl<T: Default + UnsafeCellCloneSafe> Default for CloneCell<T> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

/// # Safety
///
/// Cloning the type must not run code that could access the containing cell.
pub unsafe trait UnsafeCellCloneSafe: Clone {}

unsafe impl<T: UnsafeCellCloneSafe> UnsafeCellCloneSafe for Option<T> {}

unsafe impl<T: ?Sized> UnsafeCellCloneSafe for Rc<T> {}

unsafe impl<T: ?Sized> UnsafeCellCloneSafe for Weak<T> {}

unsafe impl UnsafeCellCloneSafe for () {}
