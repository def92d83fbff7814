//! The built binding model and its derived views.
//!
//! A [`BindingModel`] is read-only. Every view is sorted by qualified name so
//! that generated output is identical across runs.

use crate::binding::{ResetterBinding, ShadowBinding};
use crate::docs::{DocumentationTree, DocumentedPackage};
use crate::options::ModelOptions;
use crate::referent::ResolvedReferents;
use crate::types::{TypeArena, TypeId};
use serde::Serialize;
use shadowgen_common::is_within_namespace;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
pub struct BindingModel {
    types: TypeArena,
    referents: ResolvedReferents,
    imports: Vec<String>,
    /// Key: qualified name of the shadow type
    bindings: BTreeMap<String, ShadowBinding>,
    /// Key: qualified name of the shadow type. Includes unmatched hooks.
    resetters: BTreeMap<String, ResetterBinding>,
    extra_shadows: BTreeMap<String, String>,
    shadowed_namespaces: Vec<String>,
    documentation: DocumentationTree,
}

impl BindingModel {
    pub(crate) fn new(
        options: &ModelOptions,
        types: TypeArena,
        referents: ResolvedReferents,
        imports: Vec<String>,
        bindings: BTreeMap<String, ShadowBinding>,
        resetters: BTreeMap<String, ResetterBinding>,
        extra_shadows: BTreeMap<String, String>,
        documentation: DocumentationTree,
    ) -> Self {
        let shadowed_namespaces: BTreeSet<String> = bindings
            .values()
            .map(|binding| binding.actual_namespace.as_str())
            // The framework's own types are never instrumented.
            .filter(|ns| !is_within_namespace(ns, &options.self_namespace))
            .map(str::to_string)
            .collect();

        BindingModel {
            types,
            referents,
            imports,
            bindings,
            resetters,
            extra_shadows,
            shadowed_namespaces: shadowed_namespaces.into_iter().collect(),
            documentation,
        }
    }

    pub fn types(&self) -> &TypeArena {
        &self.types
    }

    /// Sorted, de-duplicated imports for the generated unit.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn all_bindings(&self) -> impl Iterator<Item = &ShadowBinding> {
        self.bindings.values()
    }

    /// Bindings whose actual type belongs to the simulated platform surface.
    pub fn core_bindings(&self) -> impl Iterator<Item = &ShadowBinding> {
        self.bindings.values().filter(|binding| binding.is_core_binding)
    }

    pub fn binding_for(&self, shadow_name: &str) -> Option<&ShadowBinding> {
        self.bindings.get(shadow_name)
    }

    /// Reset hooks whose shadow is bound in this model.
    pub fn resetters(&self) -> impl Iterator<Item = &ResetterBinding> {
        self.resetters
            .iter()
            .filter(|(shadow, _)| self.bindings.contains_key(*shadow))
            .map(|(_, resetter)| resetter)
    }

    /// Every registered reset hook, including those without a shadow binding.
    pub fn all_resetters(&self) -> impl Iterator<Item = &ResetterBinding> {
        self.resetters.values()
    }

    /// Distinct actual-type namespaces, excluding the framework's own.
    pub fn shadowed_namespaces(&self) -> &[String] {
        &self.shadowed_namespaces
    }

    /// Key: shadow class name, value: actual class name.
    pub fn extra_shadows(&self) -> &BTreeMap<String, String> {
        &self.extra_shadows
    }

    pub fn documentation(&self) -> &DocumentationTree {
        &self.documentation
    }

    pub fn documented_packages(&self) -> impl Iterator<Item = &DocumentedPackage> {
        self.documentation.packages()
    }

    pub fn referent_of(&self, id: TypeId) -> Option<&str> {
        self.referents.referent_of(id)
    }

    pub fn referent_of_name(&self, qualified_name: &str) -> Option<&str> {
        self.types
            .lookup(qualified_name)
            .and_then(|id| self.referent_of(id))
    }

    pub fn resolution_rounds(&self) -> usize {
        self.referents.rounds()
    }

    /// `Referent.method()` for a reset hook of this model.
    pub fn invocation_text_for(&self, resetter: &ResetterBinding) -> String {
        resetter.invocation_text()
    }

    /// Serializable view of the model for downstream tooling.
    pub fn report(&self) -> ModelReport<'_> {
        ModelReport {
            imports: &self.imports,
            bindings: self.all_bindings().collect(),
            resetters: self
                .resetters()
                .map(|binding| ResetterReport {
                    binding,
                    invocation: self.invocation_text_for(binding),
                })
                .collect(),
            shadowed_namespaces: &self.shadowed_namespaces,
            extra_shadows: &self.extra_shadows,
            referents: self
                .referents
                .iter()
                .filter_map(|(id, referent)| {
                    self.types
                        .get(id)
                        .map(|desc| (desc.qualified_name.as_str(), referent))
                })
                .collect(),
            documentation: &self.documentation,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReport<'a> {
    pub imports: &'a [String],
    pub bindings: Vec<&'a ShadowBinding>,
    pub resetters: Vec<ResetterReport<'a>>,
    pub shadowed_namespaces: &'a [String],
    pub extra_shadows: &'a BTreeMap<String, String>,
    /// Key: qualified name, value: referent
    pub referents: BTreeMap<&'a str, &'a str>,
    pub documentation: &'a DocumentationTree,
}

#[derive(Debug, Serialize)]
pub struct ResetterReport<'a> {
    #[serde(flatten)]
    pub binding: &'a ResetterBinding,
    pub invocation: String,
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
