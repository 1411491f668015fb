//! Recycling pool for transient value objects
//!
//! Per-frame math produces a lot of short-lived vectors and matrices. Instead of
//! allocating a fresh box for each one, callers borrow an instance from a
//! [`Pool`], use it, and hand it back with [`Pool::store`].
//!
//! # Architecture
//!
//! ```text
//! Pool
//!   └── depots: TypeId -> Vec<Box<dyn Any>>
//!            get::<T>()   pops + recycle(), or T::default()
//!            store::<T>() pushes back
//! ```
//!
//! Every concrete type has its own free list, so handing a `Vector3` back never
//! makes it reachable from `get::<Matrix4x4>()`. The depots are unbounded.
//!
//! [`Recycler`] is the process-wide pool. The scene core is single threaded, so
//! it lives in a thread local and nothing stored in it ever crosses threads.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

/// A value that can be reset to its canonical default and reused
pub trait Recyclable: Default + 'static {
    /// Reset the value to the state `Default::default()` would produce
    fn recycle(&mut self);
}

/// Free-list allocator keyed by concrete type
#[derive(Default)]
pub struct Pool {
    depots: HashMap<TypeId, Vec<Box<dyn Any>>>,
}

impl Pool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an instance of `T` out of the pool
    ///
    /// A stored instance is recycled before it is returned; when the depot for
    /// `T` is empty a new default instance is allocated.
    pub fn get<T: Recyclable>(&mut self) -> Box<T> {
        let stored = self
            .depots
            .get_mut(&TypeId::of::<T>())
            .and_then(Vec::pop)
            .and_then(|boxed| boxed.downcast::<T>().ok());

        match stored {
            Some(mut instance) => {
                instance.recycle();
                instance
            }
            None => Box::default(),
        }
    }

    /// Hand an instance back to the pool
    ///
    /// The instance becomes available to the next [`get`](Self::get) of the
    /// same type. Ownership moves into the pool, so the caller cannot keep
    /// using it.
    pub fn store<T: Recyclable>(&mut self, instance: Box<T>) {
        self.depots
            .entry(TypeId::of::<T>())
            .or_default()
            .push(instance);
    }

    /// Number of stored instances of `T`
    pub fn available<T: Recyclable>(&self) -> usize {
        self.depots.get(&TypeId::of::<T>()).map_or(0, Vec::len)
    }

    /// Drop every stored instance of every type
    pub fn clear(&mut self) {
        self.depots.clear();
    }

    /// Total number of stored instances across all types
    pub fn len(&self) -> usize {
        self.depots.values().map(Vec::len).sum()
    }

    /// Whether the pool holds no instances at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("types", &self.depots.len())
            .field("stored", &self.len())
            .finish()
    }
}

thread_local! {
    static RECYCLER: RefCell<Pool> = RefCell::new(Pool::new());
}

/// Process-wide pool shared by the whole scene core
pub struct Recycler;

impl Recycler {
    /// Take an instance from the shared pool
    pub fn get<T: Recyclable>() -> Box<T> {
        RECYCLER.with(|pool| pool.borrow_mut().get())
    }

    /// Hand an instance back to the shared pool
    pub fn store<T: Recyclable>(instance: Box<T>) {
        RECYCLER.with(|pool| pool.borrow_mut().store(instance));
    }

    /// Number of stored instances of `T` in the shared pool
    pub fn available<T: Recyclable>() -> usize {
        RECYCLER.with(|pool| pool.borrow().available::<T>())
    }

    /// Drop everything stored in the shared pool
    pub fn dump_all() {
        RECYCLER.with(|pool| pool.borrow_mut().clear());
    }
}
