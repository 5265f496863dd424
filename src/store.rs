//! A pool of scratch integers for the in-place algorithms.

use crate::mutint::MutInt;
use core::cell::{Cell, RefCell};
use core::ops::{Deref, DerefMut};

/// Free list of scratch [MutInt] values sized for a given number of limbs.
///
/// Values are handed out as [Scratch] guards which put the value back when dropped, so a
/// scratch value is returned on every exit path, including early `?` returns. The store uses
/// interior mutability and is not `Sync`; every thread keeps its own.
pub struct MutIntStore {
    limbs: usize,
    free: RefCell<Vec<MutInt>>,
    created: Cell<usize>,
}

impl MutIntStore {
    /// Create an empty store whose fresh values reserve `limbs` limbs.
    pub fn new(limbs: usize) -> Self {
        MutIntStore {
            limbs,
            free: RefCell::new(Vec::new()),
            created: Cell::new(0),
        }
    }

    /// Limb capacity of freshly created values
    #[inline]
    pub fn limbs(&self) -> usize {
        self.limbs
    }

    /// Number of values this store has created so far
    #[inline]
    pub fn created(&self) -> usize {
        self.created.get()
    }

    /// Number of values waiting in the free list
    #[inline]
    pub fn available(&self) -> usize {
        self.free.borrow().len()
    }

    /// Take a zero valued scratch integer from the free list, creating one if it is empty.
    pub fn acquire(&self) -> Scratch<'_> {
        let value = self.free.borrow_mut().pop();
        let value = value.unwrap_or_else(|| {
            self.created.set(self.created.get() + 1);
            log::trace!(
                "scratch store grows to {} values of {} limbs",
                self.created.get(),
                self.limbs
            );
            MutInt::with_capacity(self.limbs)
        });
        Scratch {
            store: self,
            value,
            detached: false,
        }
    }

    fn release(&self, mut value: MutInt) {
        value.set_zero();
        self.free.borrow_mut().push(value);
    }
}

/// A scratch value borrowed from a [MutIntStore]. Dereferences to [MutInt].
pub struct Scratch<'a> {
    store: &'a MutIntStore,
    value: MutInt,
    detached: bool,
}

impl Scratch<'_> {
    /// Take the value out of the pool for good.
    pub fn detach(mut self) -> MutInt {
        self.detached = true;
        core::mem::take(&mut self.value)
    }
}

impl Deref for Scratch<'_> {
    type Target = MutInt;

    #[inline]
    fn deref(&self) -> &MutInt {
        &self.value
    }
}

impl DerefMut for Scratch<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut MutInt {
        &mut self.value
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        if !self.detached {
            self.store.release(core::mem::take(&mut self.value));
        }
    }
}
