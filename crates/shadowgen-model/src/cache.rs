//! Session-owned cache of built models.
//!
//! A cache belongs to one compilation or test session and is keyed by the
//! identity of a unit within it. Lifecycle:
//!
//! 1. An entry is populated lazily by the first [`ModelCache::get_or_build`]
//!    call for its key. Concurrent callers for the same key wait for that one
//!    build instead of running their own.
//! 2. A populated entry is never replaced. A failed build leaves the entry
//!    empty, so a later call may try again.
//! 3. The cache is dropped with its session, or explicitly through
//!    [`ModelCache::teardown`].

use crate::error::ModelError;
use crate::model::BindingModel;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

type Slot = Arc<OnceCell<Arc<BindingModel>>>;

pub struct ModelCache<K> {
    entries: DashMap<K, Slot>,
}

impl<K> ModelCache<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// The model built for `key`, if any.
    pub fn get(&self, key: &K) -> Option<Arc<BindingModel>> {
        self.entries.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Return the model for `key`, running `build` if none has been built yet.
    pub fn get_or_build<F>(&self, key: K, build: F) -> Result<Arc<BindingModel>, ModelError>
    where
        F: FnOnce() -> Result<BindingModel, ModelError>,
    {
        // Clone the slot out so the shard lock is not held while building.
        let slot: Slot = self.entries.entry(key).or_default().value().clone();
        if let Some(model) = slot.get() {
            trace!("model cache hit");
            return Ok(Arc::clone(model));
        }
        slot.get_or_try_init(|| {
            trace!("model cache miss; building");
            build().map(Arc::new)
        })
        .cloned()
    }

    /// Number of keys with a built model.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached model, returning how many were built.
    pub fn teardown(self) -> usize {
        let built = self.len();
        trace!(built, "tearing down model cache");
        built
    }
}

impl<K> Default for ModelCache<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod tests;
