//! Shadow and resetter bindings.
//!
//! The builder records raw declarations ([`ShadowDecl`], [`ResetterDecl`]).
//! Once referents are known, each declaration is prepared exactly once into
//! its finalized form, which carries every string the code generator needs.

use crate::error::ModelError;
use crate::referent::ResolvedReferents;
use crate::types::{TypeArena, TypeId};
use serde::Serialize;

/// A shadow-to-actual pairing as registered with the builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowDecl {
    pub shadow_type: TypeId,
    pub actual_type: TypeId,
    pub is_core_binding: bool,
    pub is_deprecated: bool,
    pub actual_is_public: bool,
}

/// A static reset hook as registered with the builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetterDecl {
    pub shadow_type: TypeId,
    pub reset_method_name: String,
    pub min_version: i32,
    pub max_version: i32,
}

/// A finalized shadow binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowBinding {
    pub shadow_type: TypeId,
    pub actual_type: TypeId,
    pub shadow_name: String,
    pub actual_name: String,
    pub is_core_binding: bool,
    pub is_deprecated: bool,
    pub actual_is_public: bool,
    /// Generic parameter declaration, e.g. `<K extends Comparable,V>`. Empty
    /// for non-generic actual types.
    pub param_def: String,
    /// Generic parameter usage, e.g. `<K,V>`.
    pub param_use: String,
    pub shadow_referent: String,
    pub actual_referent: String,
    pub actual_namespace: String,
    pub shadow_binary_name: String,
}

impl ShadowBinding {
    pub(crate) fn prepare(
        decl: &ShadowDecl,
        arena: &TypeArena,
        referents: &ResolvedReferents,
    ) -> Result<Self, ModelError> {
        let shadow = arena.try_get(decl.shadow_type)?;
        let actual = arena.try_get(decl.actual_type)?;

        let mut param_def = String::new();
        let mut param_use = String::new();
        for (i, param) in actual.type_params.iter().enumerate() {
            if i > 0 {
                param_def.push(',');
                param_use.push(',');
            }
            param_def.push_str(&param.name);
            param_use.push_str(&param.name);
            for (j, bound) in param.bounds.iter().enumerate() {
                param_def.push_str(if j == 0 { " extends " } else { " & " });
                param_def.push_str(referent_for(arena, referents, *bound)?);
            }
        }
        if !actual.type_params.is_empty() {
            param_def = format!("<{param_def}>");
            param_use = format!("<{param_use}>");
        }

        Ok(ShadowBinding {
            shadow_type: decl.shadow_type,
            actual_type: decl.actual_type,
            shadow_name: shadow.qualified_name.clone(),
            actual_name: actual.qualified_name.clone(),
            is_core_binding: decl.is_core_binding,
            is_deprecated: decl.is_deprecated,
            actual_is_public: decl.actual_is_public,
            param_def,
            param_use,
            shadow_referent: referent_for(arena, referents, decl.shadow_type)?.to_string(),
            actual_referent: referent_for(arena, referents, decl.actual_type)?.to_string(),
            actual_namespace: arena.namespace_of(decl.actual_type)?.to_string(),
            shadow_binary_name: arena.binary_name_of(decl.shadow_type)?,
        })
    }

    /// Actual type referent followed by its generic usage, e.g. `Map.Entry<K,V>`.
    pub fn actual_type_with_params(&self) -> String {
        format!("{}{}", self.actual_referent, self.param_use)
    }

    pub fn shadow_type_with_params(&self) -> String {
        format!("{}{}", self.shadow_referent, self.param_use)
    }
}

/// A finalized reset hook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetterBinding {
    pub shadow_type: TypeId,
    pub shadow_name: String,
    pub reset_method_name: String,
    pub min_version: i32,
    pub max_version: i32,
    pub shadow_referent: String,
}

impl ResetterBinding {
    /// Prepare a resetter whose shadow was registered with the resolver.
    pub(crate) fn prepare(
        decl: &ResetterDecl,
        arena: &TypeArena,
        referents: &ResolvedReferents,
    ) -> Result<Self, ModelError> {
        let referent = referent_for(arena, referents, decl.shadow_type)?.to_string();
        Self::with_referent(decl, arena, referent)
    }

    /// Prepare a resetter with no matching shadow binding.
    ///
    /// The shadow keeps its resolved referent if it was registered some other
    /// way (as the actual type of another binding, say); otherwise it is
    /// referred to by qualified name.
    pub(crate) fn prepare_unmatched(
        decl: &ResetterDecl,
        arena: &TypeArena,
        referents: &ResolvedReferents,
    ) -> Result<Self, ModelError> {
        let referent = match referents.referent_of(decl.shadow_type) {
            Some(referent) => referent.to_string(),
            None => arena.try_get(decl.shadow_type)?.qualified_name.clone(),
        };
        Self::with_referent(decl, arena, referent)
    }

    fn with_referent(
        decl: &ResetterDecl,
        arena: &TypeArena,
        shadow_referent: String,
    ) -> Result<Self, ModelError> {
        Ok(ResetterBinding {
            shadow_type: decl.shadow_type,
            shadow_name: arena.try_get(decl.shadow_type)?.qualified_name.clone(),
            reset_method_name: decl.reset_method_name.clone(),
            min_version: decl.min_version,
            max_version: decl.max_version,
            shadow_referent,
        })
    }

    /// `Referent.method()`
    pub fn invocation_text(&self) -> String {
        format!("{}.{}()", self.shadow_referent, self.reset_method_name)
    }
}

fn referent_for<'r>(
    arena: &TypeArena,
    referents: &'r ResolvedReferents,
    id: TypeId,
) -> Result<&'r str, ModelError> {
    referents.referent_of(id).ok_or_else(|| {
        let name = arena
            .get(id)
            .map_or_else(|| format!("#{}", id.0), |desc| desc.qualified_name.clone());
        ModelError::internal(format!("type {name} was never assigned a referent"))
    })
}
