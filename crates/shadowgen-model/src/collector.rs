//! Type collection.
//!
//! Walks the types a binding references and registers each distinct
//! descriptor once. Registering a type also registers every type named in its
//! generic-parameter bounds, transitively.

use crate::error::ModelError;
use crate::types::{TypeArena, TypeId};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use tracing::trace;

/// Set of types that will appear in one generated unit.
pub struct Collector<'a> {
    arena: &'a TypeArena,
    registered: IndexSet<TypeId, FxBuildHasher>,
}

impl<'a> Collector<'a> {
    pub fn new(arena: &'a TypeArena) -> Self {
        Self {
            arena,
            registered: IndexSet::default(),
        }
    }

    /// Register `id` and the bounds of its generic parameters.
    ///
    /// Idempotent. A type is marked before its bounds are visited, so bounds
    /// that refer back to the type itself terminate.
    pub fn register(&mut self, id: TypeId) -> Result<(), ModelError> {
        let mut worklist = vec![id];
        while let Some(current) = worklist.pop() {
            let desc = self.arena.try_get(current)?;
            if !self.registered.insert(current) {
                continue;
            }
            trace!(type_name = %desc.qualified_name, "registered type");
            for param in &desc.type_params {
                worklist.extend(param.bounds.iter().copied());
            }
        }
        Ok(())
    }

    pub fn is_registered(&self, id: TypeId) -> bool {
        self.registered.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Registered types in first-registration order.
    pub fn registered(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.registered.iter().copied()
    }

    pub fn into_registered(self) -> Vec<TypeId> {
        self.registered.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "../tests/collector_tests.rs"]
mod tests;
