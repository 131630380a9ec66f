//! Entity storage boundary.
//!
//! `EntityStore` is the keyed collection of users and profiles. Implementations
//! are plain (unsynchronized) data structures; [`SharedStore`] adds the lock that
//! turns each service call into one atomic read-check-write unit.

pub mod in_memory;
pub mod r#trait;

use std::sync::{Arc, PoisonError, RwLock};

pub use in_memory::InMemoryEntityStore;
pub use r#trait::EntityStore;

/// Shared, lock-guarded handle to an [`EntityStore`].
///
/// Writers hold the exclusive lock for the whole closure, so existence checks,
/// uniqueness checks, the administrator guard and the mutation all observe the
/// same snapshot.
#[derive(Debug)]
pub struct SharedStore<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EntityStore> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` under the shared (read) lock.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        // Writes validate before mutating, so a poisoned lock still guards consistent data.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` under the exclusive (write) lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Default for SharedStore<InMemoryEntityStore> {
    fn default() -> Self {
        Self::new(InMemoryEntityStore::new())
    }
}
