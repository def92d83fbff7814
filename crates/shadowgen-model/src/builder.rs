//! Mutable model builder.
//!
//! The builder accumulates declarations, then [`ModelBuilder::build`] runs the
//! collector and the referent resolver once over everything registered and
//! hands back an immutable [`BindingModel`]. A builder builds exactly once.

use crate::binding::{ResetterBinding, ResetterDecl, ShadowBinding, ShadowDecl};
use crate::collector::Collector;
use crate::docs::{DocumentationTree, DocumentedMethod};
use crate::error::ModelError;
use crate::model::BindingModel;
use crate::options::ModelOptions;
use crate::referent::{ReferentResolver, assemble_imports};
use crate::types::{TypeArena, TypeId};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub struct ModelBuilder {
    options: ModelOptions,
    types: TypeArena,
    /// Key: qualified name of the shadow type
    shadows: BTreeMap<String, ShadowDecl>,
    /// Key: qualified name of the shadow type
    resetters: BTreeMap<String, ResetterDecl>,
    /// Key: shadow class name, value: actual class name
    extra_shadows: BTreeMap<String, String>,
    documentation: DocumentationTree,
    built: bool,
}

impl ModelBuilder {
    pub fn new(options: ModelOptions) -> Self {
        Self::with_types(TypeArena::new(), options)
    }

    /// Start from an arena already populated by the scanner.
    pub fn with_types(types: TypeArena, options: ModelOptions) -> Self {
        ModelBuilder {
            options,
            types,
            shadows: BTreeMap::new(),
            resetters: BTreeMap::new(),
            extra_shadows: BTreeMap::new(),
            documentation: DocumentationTree::new(),
            built: false,
        }
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn types(&self) -> &TypeArena {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeArena {
        &mut self.types
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    fn ensure_open(&self) -> Result<(), ModelError> {
        if self.built {
            Err(ModelError::AlreadyBuilt)
        } else {
            Ok(())
        }
    }

    /// Bind `shadow_type` to `actual_type`.
    ///
    /// Registering the same pair again is a no-op. Binding an already-bound
    /// shadow to a different actual type fails and leaves the first binding.
    pub fn add_shadow_binding(
        &mut self,
        shadow_type: TypeId,
        actual_type: TypeId,
        is_core_binding: bool,
        is_deprecated: bool,
        actual_is_public: bool,
    ) -> Result<(), ModelError> {
        self.ensure_open()?;
        let shadow_name = self.types.try_get(shadow_type)?.qualified_name.clone();
        let actual_name = &self.types.try_get(actual_type)?.qualified_name;

        if let Some(existing) = self.shadows.get(&shadow_name) {
            if existing.actual_type == actual_type {
                debug!(shadow = %shadow_name, "shadow binding already registered");
                return Ok(());
            }
            return Err(ModelError::DuplicateBinding {
                shadow: shadow_name,
                existing: self.types.try_get(existing.actual_type)?.qualified_name.clone(),
                attempted: actual_name.clone(),
            });
        }

        debug!(shadow = %shadow_name, actual = %actual_name, "added shadow binding");
        self.shadows.insert(
            shadow_name,
            ShadowDecl {
                shadow_type,
                actual_type,
                is_core_binding,
                is_deprecated,
                actual_is_public,
            },
        );
        Ok(())
    }

    /// Register a static reset hook for `shadow_type`.
    ///
    /// A shadow has at most one hook; registering another replaces it. The
    /// hook only shows up in [`BindingModel::resetters`] if the shadow is
    /// bound by the time the model is built.
    pub fn add_resetter_binding(
        &mut self,
        shadow_type: TypeId,
        reset_method_name: &str,
        min_version: i32,
        max_version: i32,
    ) -> Result<(), ModelError> {
        self.ensure_open()?;
        let shadow_name = self.types.try_get(shadow_type)?.qualified_name.clone();
        let decl = ResetterDecl {
            shadow_type,
            reset_method_name: reset_method_name.to_string(),
            min_version,
            max_version,
        };
        if let Some(previous) = self.resetters.insert(shadow_name, decl)
            && previous.reset_method_name != reset_method_name
        {
            warn!(
                previous = %previous.reset_method_name,
                replacement = %reset_method_name,
                "replaced reset hook"
            );
        }
        Ok(())
    }

    /// Map a shadow to an actual class known only by name.
    pub fn add_extra_shadow(
        &mut self,
        actual_class_name: &str,
        shadow_class_name: &str,
    ) -> Result<(), ModelError> {
        self.ensure_open()?;
        self.extra_shadows
            .insert(shadow_class_name.to_string(), actual_class_name.to_string());
        Ok(())
    }

    pub fn document_package(&mut self, name: &str, documentation: &str) -> Result<(), ModelError> {
        self.ensure_open()?;
        self.documentation.document_package(name, documentation);
        Ok(())
    }

    pub fn document_type(
        &mut self,
        type_id: TypeId,
        documentation: &str,
        imports: Vec<String>,
    ) -> Result<(), ModelError> {
        self.ensure_open()?;
        let package = self.types.namespace_of(type_id)?;
        let qualified = &self.types.try_get(type_id)?.qualified_name;
        self.documentation
            .document_type(package, qualified, documentation, imports);
        Ok(())
    }

    pub fn document_method(
        &mut self,
        type_id: TypeId,
        method: DocumentedMethod,
    ) -> Result<(), ModelError> {
        self.ensure_open()?;
        let package = self.types.namespace_of(type_id)?;
        let qualified = &self.types.try_get(type_id)?.qualified_name;
        self.documentation.document_method(package, qualified, method);
        Ok(())
    }

    /// Every registered shadow declaration, sorted by shadow name.
    pub fn shadow_decls(&self) -> impl Iterator<Item = &ShadowDecl> {
        self.shadows.values()
    }

    /// Every registered reset hook, matched or not, sorted by shadow name.
    pub fn resetter_decls(&self) -> impl Iterator<Item = &ResetterDecl> {
        self.resetters.values()
    }

    /// Resolve referents and finalize every binding.
    ///
    /// The builder is spent afterwards, whether or not the build succeeded.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(shadows = self.shadows.len(), resetters = self.resetters.len())
    )]
    pub fn build(&mut self) -> Result<BindingModel, ModelError> {
        self.ensure_open()?;
        self.built = true;

        let types = std::mem::take(&mut self.types);
        let shadows = std::mem::take(&mut self.shadows);
        let resetter_decls = std::mem::take(&mut self.resetters);

        let mut collector = Collector::new(&types);
        for decl in shadows.values() {
            collector.register(decl.shadow_type)?;
            collector.register(decl.actual_type)?;
        }
        debug!(registered = collector.len(), "collected types");

        let referents = ReferentResolver::new(&types).resolve(collector.registered())?;
        debug!(rounds = referents.rounds(), "resolved referents");
        let imports = assemble_imports(&types, &referents, &self.options)?;

        let mut bindings = BTreeMap::new();
        for (name, decl) in &shadows {
            bindings.insert(
                name.clone(),
                ShadowBinding::prepare(decl, &types, &referents)?,
            );
        }

        let mut resetters = BTreeMap::new();
        for (name, decl) in &resetter_decls {
            let resetter = if shadows.contains_key(name) {
                ResetterBinding::prepare(decl, &types, &referents)?
            } else {
                debug!(shadow = %name, "reset hook has no shadow binding");
                ResetterBinding::prepare_unmatched(decl, &types, &referents)?
            };
            resetters.insert(name.clone(), resetter);
        }

        Ok(BindingModel::new(
            &self.options,
            types,
            referents,
            imports,
            bindings,
            resetters,
            std::mem::take(&mut self.extra_shadows),
            std::mem::take(&mut self.documentation),
        ))
    }
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
