//! Referent resolution.
//!
//! Assigns every registered type the shortest name that is unique within the
//! generated unit:
//!
//! 1. Round 0 buckets types by simple name.
//! 2. A bucket with one member is resolved to its key.
//! 3. Members of a colliding bucket climb one scope outward. A member nested
//!    in type `T` moves to the bucket `T.<key>` of the next round and records
//!    `T` as its import owner. A member whose scope is a namespace is fixed to
//!    its fully qualified name, which needs no import.
//!
//! Every round moves each unresolved member one nesting level outward, so the
//! number of rounds is bounded by the deepest nesting plus one.
//!
//! ## Example
//!
//! | Round | Key | Members | Outcome |
//! |-------|-----|---------|---------|
//! | 0 | `Inner` | `a.Outer1.Inner`, `b.Outer2.Inner` | collide |
//! | 1 | `Outer1.Inner` | `a.Outer1.Inner` | resolved, imports `a.Outer1` |
//! | 1 | `Outer2.Inner` | `b.Outer2.Inner` | resolved, imports `b.Outer2` |

use crate::error::ModelError;
use crate::options::ModelOptions;
use crate::types::{Scope, TypeArena, TypeId};
use rustc_hash::FxHashMap;
use shadowgen_common::join_qualified;
use shadowgen_common::limits::MAX_RESOLUTION_ROUNDS;
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

type Bucket = SmallVec<[TypeId; 2]>;

/// Output of the referent resolver.
#[derive(Debug, Default)]
pub struct ResolvedReferents {
    referents: FxHashMap<TypeId, String>,
    import_owners: FxHashMap<TypeId, TypeId>,
    rounds: usize,
}

impl ResolvedReferents {
    /// Display name for `id` in the generated unit.
    pub fn referent_of(&self, id: TypeId) -> Option<&str> {
        self.referents.get(&id).map(String::as_str)
    }

    /// The type that must be imported for the referent of `id` to resolve.
    ///
    /// `None` when the referent is fully qualified.
    pub fn import_owner(&self, id: TypeId) -> Option<TypeId> {
        self.import_owners.get(&id).copied()
    }

    /// Number of disambiguation rounds that ran.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn len(&self) -> usize {
        self.referents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.referents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &str)> {
        self.referents.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

/// Computes referents for a set of registered types.
pub struct ReferentResolver<'a> {
    arena: &'a TypeArena,
}

impl<'a> ReferentResolver<'a> {
    pub fn new(arena: &'a TypeArena) -> Self {
        Self { arena }
    }

    pub fn resolve<I>(&self, types: I) -> Result<ResolvedReferents, ModelError>
    where
        I: IntoIterator<Item = TypeId>,
    {
        // Keyed by the current qualification; BTreeMap keeps rounds reproducible.
        let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();
        // Member -> type whose scope is inspected next. Doubles as the import owner.
        let mut owners: FxHashMap<TypeId, TypeId> = FxHashMap::default();

        for id in types {
            let desc = self.arena.try_get(id)?;
            if owners.insert(id, id).is_none() {
                buckets.entry(desc.simple_name.clone()).or_default().push(id);
            }
        }

        let mut referents = FxHashMap::default();
        let mut rounds = 0;
        while !buckets.is_empty() {
            if rounds == MAX_RESOLUTION_ROUNDS {
                return Err(ModelError::internal(format!(
                    "referent resolution did not converge after {MAX_RESOLUTION_ROUNDS} rounds"
                )));
            }
            rounds += 1;

            let mut queue: VecDeque<(String, Bucket)> =
                std::mem::take(&mut buckets).into_iter().collect();
            while let Some((key, members)) = queue.pop_front() {
                if let [only] = members.as_slice() {
                    referents.insert(*only, key);
                    continue;
                }
                for member in members {
                    let frontier = owners.get(&member).copied().ok_or_else(|| {
                        ModelError::internal(format!("type {} lost its scope frontier", member.0))
                    })?;
                    match &self.arena.try_get(frontier)?.scope {
                        Scope::Type(parent) => {
                            let parent_name = &self.arena.try_get(*parent)?.simple_name;
                            buckets
                                .entry(join_qualified(parent_name, &key))
                                .or_default()
                                .push(member);
                            owners.insert(member, *parent);
                        }
                        Scope::Namespace(_) => {
                            let qualified = self.arena.try_get(member)?.qualified_name.clone();
                            referents.insert(member, qualified);
                            owners.remove(&member);
                        }
                    }
                }
            }
            debug!(round = rounds, pending = buckets.len(), "referent round complete");
        }

        check_unique(self.arena, &referents)?;

        Ok(ResolvedReferents {
            referents,
            import_owners: owners,
            rounds,
        })
    }
}

fn check_unique(arena: &TypeArena, referents: &FxHashMap<TypeId, String>) -> Result<(), ModelError> {
    let mut seen: FxHashMap<&str, TypeId> = FxHashMap::default();
    for (id, name) in referents {
        if let Some(other) = seen.insert(name.as_str(), *id) {
            let first = arena.try_get(other)?;
            let second = arena.try_get(*id)?;
            return Err(ModelError::internal(format!(
                "referent {name} assigned to both {} and {}",
                first.qualified_name, second.qualified_name
            )));
        }
    }
    Ok(())
}

/// Build the sorted import list for a resolved unit.
///
/// Each import owner is imported when it is public and does not live in the
/// implicitly-available root namespace; the configured infrastructure imports
/// are always added. Two owners sharing a simple name are an
/// [`ModelError::InternalConsistency`] fault.
pub fn assemble_imports(
    arena: &TypeArena,
    resolved: &ResolvedReferents,
    options: &ModelOptions,
) -> Result<Vec<String>, ModelError> {
    let implicit = match options.implicit_namespace.as_deref() {
        Some(ns) if !arena.has_namespace(ns) => {
            return Err(ModelError::NamespaceResolutionFailure {
                namespace: ns.to_string(),
            });
        }
        other => other,
    };

    // Key: qualified name, value: simple name
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for owner in resolved.import_owners.values() {
        let desc = arena.try_get(*owner)?;
        if !desc.is_public() {
            continue;
        }
        if let Scope::Namespace(ns) = &desc.scope
            && (ns.is_empty() || implicit == Some(ns.as_str()))
        {
            continue;
        }
        owners.insert(&desc.qualified_name, &desc.simple_name);
    }

    // Two imports with one simple name would make both ambiguous.
    let mut by_simple: FxHashMap<&str, &str> = FxHashMap::default();
    for (&qualified, &simple) in &owners {
        if let Some(first) = by_simple.insert(simple, qualified) {
            return Err(ModelError::internal(format!(
                "imports {first} and {qualified} share the simple name {simple}"
            )));
        }
    }

    let mut imports: BTreeSet<String> = owners.into_keys().map(str::to_string).collect();
    imports.extend(options.infrastructure_imports.iter().cloned());

    Ok(imports.into_iter().collect())
}

#[cfg(test)]
#[path = "../tests/referent_tests.rs"]
mod tests;
