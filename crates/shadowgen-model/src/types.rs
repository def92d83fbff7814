//! Type descriptors and the arena that owns them.
//!
//! The upstream scanner declares every type it has seen into a [`TypeArena`]
//! and refers to them by [`TypeId`]. A descriptor's identity is its qualified
//! name: declaring the same qualified name twice yields the same id.
//!
//! Enclosing types must be declared before the types nested in them, so the
//! scope graph is acyclic by construction.

use crate::error::ModelError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use shadowgen_common::limits::MAX_SCOPE_WALK_DEPTH;
use shadowgen_common::{binary_name, join_qualified};
use smallvec::SmallVec;
use tracing::warn;

/// Index of a type descriptor inside a [`TypeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// Host visibility of a declared type.
///
/// Only `Public` matters to the model: non-public owners are never imported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

impl Visibility {
    pub const fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Where a type is declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Top-level type in a namespace. The empty string is the unnamed namespace.
    Namespace(String),
    /// Member type nested inside another type.
    Type(TypeId),
}

/// A generic parameter and its explicit bounds, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: SmallVec<[TypeId; 2]>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: SmallVec::new(),
        }
    }

    pub fn with_bounds(name: impl Into<String>, bounds: impl IntoIterator<Item = TypeId>) -> Self {
        Self {
            name: name.into(),
            bounds: bounds.into_iter().collect(),
        }
    }
}

/// One declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub qualified_name: String,
    pub simple_name: String,
    pub scope: Scope,
    pub visibility: Visibility,
    pub type_params: Vec<TypeParam>,
}

impl TypeDescriptor {
    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }
}

/// Arena of type descriptors handed to the model builder.
///
/// Besides types, the arena tracks the namespaces known to the host
/// environment: the namespace of every declared top-level type plus any
/// namespace declared explicitly with [`TypeArena::declare_namespace`].
#[derive(Debug, Default)]
pub struct TypeArena {
    types: Vec<TypeDescriptor>,
    by_name: FxHashMap<String, TypeId>,
    namespaces: FxHashSet<String>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        (id.0 as usize) < self.types.len()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.0 as usize)
    }

    /// Like [`TypeArena::get`], but reports a foreign id as an error.
    pub fn try_get(&self, id: TypeId) -> Result<&TypeDescriptor, ModelError> {
        self.get(id).ok_or(ModelError::UnknownType { id })
    }

    /// Look up a declared type by qualified name.
    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDescriptor)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, desc)| (TypeId(i as u32), desc))
    }

    /// Record a namespace as present in the host environment.
    pub fn declare_namespace(&mut self, name: impl Into<String>) {
        self.namespaces.insert(name.into());
    }

    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespaces.contains(name)
    }

    /// Declare a type, or return the id of the type already declared under the
    /// same qualified name.
    pub fn declare(
        &mut self,
        scope: Scope,
        simple_name: &str,
        visibility: Visibility,
    ) -> Result<TypeId, ModelError> {
        let qualified_name = match &scope {
            Scope::Namespace(ns) => join_qualified(ns, simple_name),
            Scope::Type(parent) => {
                join_qualified(&self.try_get(*parent)?.qualified_name, simple_name)
            }
        };

        Ok(self.insert(qualified_name, scope, simple_name, visibility))
    }

    fn insert(
        &mut self,
        qualified_name: String,
        scope: Scope,
        simple_name: &str,
        visibility: Visibility,
    ) -> TypeId {
        if let Some(existing) = self.lookup(&qualified_name) {
            let desc = &self.types[existing.0 as usize];
            if desc.scope != scope || desc.visibility != visibility {
                warn!(
                    type_name = %qualified_name,
                    "type redeclared with a different scope or visibility; keeping first declaration"
                );
            }
            return existing;
        }

        if let Scope::Namespace(ns) = &scope {
            self.namespaces.insert(ns.clone());
        }

        let id = TypeId(self.types.len() as u32);
        self.by_name.insert(qualified_name.clone(), id);
        self.types.push(TypeDescriptor {
            qualified_name,
            simple_name: simple_name.to_string(),
            scope,
            visibility,
            type_params: Vec::new(),
        });
        id
    }

    /// Declare a top-level type in `namespace`.
    pub fn declare_top_level(
        &mut self,
        namespace: &str,
        simple_name: &str,
        visibility: Visibility,
    ) -> TypeId {
        let qualified_name = join_qualified(namespace, simple_name);
        self.insert(
            qualified_name,
            Scope::Namespace(namespace.to_string()),
            simple_name,
            visibility,
        )
    }

    /// Declare a member type nested inside `parent`.
    pub fn declare_nested(
        &mut self,
        parent: TypeId,
        simple_name: &str,
        visibility: Visibility,
    ) -> Result<TypeId, ModelError> {
        self.declare(Scope::Type(parent), simple_name, visibility)
    }

    /// Append a generic parameter to a declared type.
    ///
    /// Bounds may reference the type itself (`T extends Comparable<T>`), but
    /// every bound must already be declared.
    pub fn add_type_param(&mut self, id: TypeId, param: TypeParam) -> Result<(), ModelError> {
        self.try_get(id)?;
        if let Some(&bad) = param.bounds.iter().find(|bound| !self.contains(**bound)) {
            return Err(ModelError::UnknownType { id: bad });
        }
        self.types[id.0 as usize].type_params.push(param);
        Ok(())
    }

    /// The namespace a type ultimately lives in.
    pub fn namespace_of(&self, id: TypeId) -> Result<&str, ModelError> {
        let mut current = self.try_get(id)?;
        for _ in 0..MAX_SCOPE_WALK_DEPTH {
            match &current.scope {
                Scope::Namespace(ns) => return Ok(ns),
                Scope::Type(parent) => current = self.try_get(*parent)?,
            }
        }
        Err(ModelError::internal(format!(
            "scope chain of {} exceeds {MAX_SCOPE_WALK_DEPTH} levels",
            self.types[id.0 as usize].qualified_name
        )))
    }

    /// Simple names from the outermost enclosing type down to `id`.
    pub fn nesting_chain(&self, id: TypeId) -> Result<Vec<&str>, ModelError> {
        let mut chain = Vec::new();
        let mut current = self.try_get(id)?;
        for _ in 0..MAX_SCOPE_WALK_DEPTH {
            chain.push(current.simple_name.as_str());
            match &current.scope {
                Scope::Namespace(_) => {
                    chain.reverse();
                    return Ok(chain);
                }
                Scope::Type(parent) => current = self.try_get(*parent)?,
            }
        }
        Err(ModelError::internal(format!(
            "scope chain of {} exceeds {MAX_SCOPE_WALK_DEPTH} levels",
            self.types[id.0 as usize].qualified_name
        )))
    }

    /// Runtime-loadable name: `ns.Outer$Inner`.
    pub fn binary_name_of(&self, id: TypeId) -> Result<String, ModelError> {
        let chain = self.nesting_chain(id)?;
        Ok(binary_name(self.namespace_of(id)?, &chain))
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
