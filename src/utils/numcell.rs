use std::{cell::Cell, ops::Add};

#[derive(Default)]
pub struct NumCell<T> {
    t: Cell<T>,
}

impl<T> NumCell<T> {
    #[inline(always)]
    pub const fn new(t: T) -> Self {
        Self { t: Cell::new(t) }
    }

    #[inline(always)]
    pub fn set(&self, n: T) {
        let _ = self.t.replace(n);
    }

    #[inline(always)]
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        self.t.get()
    }

    #[inline(always)]
    pub fn fetch_add(&self, n: T) -> T
    where
        T: Copy + Add<T, Output = T>,
    {
        let res = self.t.get();
        self.t.set(res + n);
        res
    }

    /// Increments the value, wrapping around at the numeric bounds, and returns the new value.
    #[inline(always)]
    pub fn next_wrapping(&self) -> T
    where
        T: Copy + WrappingIncrement,
    {
        let res = self.t.get().wrapping_increment();
        self.t.set(res);
        res
    }
}

pub trait WrappingIncrement {
    fn wrapping_increment(self) -> Self;
}

macro_rules! wrapping {
    ($($ty:ty),*) => {
        $(
            impl WrappingIncrement for $ty {
                fn wrapping_increment(self) -> Self {
                    self.wrapping_add(1)
                }
            }
        )*
    };
}

wrapping!(u32, u64);
