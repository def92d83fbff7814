//! Documentation tree attached to the model.
//!
//! Packages own types keyed by qualified name; types own methods keyed by
//! name. Entries are created on first use, so documentation can be attached
//! in any order.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentedMethod {
    pub name: String,
    pub documentation: Option<String>,
    pub params: Vec<String>,
    pub return_type: Option<String>,
    pub min_version: i32,
    pub max_version: i32,
}

impl DocumentedMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_version: -1,
            max_version: -1,
            ..Self::default()
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_versions(mut self, min_version: i32, max_version: i32) -> Self {
        self.min_version = min_version;
        self.max_version = max_version;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentedType {
    pub name: String,
    pub documentation: Option<String>,
    pub imports: Vec<String>,
    pub methods: BTreeMap<String, DocumentedMethod>,
}

impl DocumentedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn method(&self, name: &str) -> Option<&DocumentedMethod> {
        self.methods.get(name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentedPackage {
    pub name: String,
    pub documentation: Option<String>,
    pub types: BTreeMap<String, DocumentedType>,
}

impl DocumentedPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn documented_type(&self, qualified_name: &str) -> Option<&DocumentedType> {
        self.types.get(qualified_name)
    }

    fn documented_type_mut(&mut self, qualified_name: &str) -> &mut DocumentedType {
        self.types
            .entry(qualified_name.to_string())
            .or_insert_with(|| DocumentedType::new(qualified_name))
    }
}

/// All documented packages, keyed by namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentationTree {
    packages: BTreeMap<String, DocumentedPackage>,
}

impl DocumentationTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn package(&self, name: &str) -> Option<&DocumentedPackage> {
        self.packages.get(name)
    }

    /// Packages sorted by name.
    pub fn packages(&self) -> impl Iterator<Item = &DocumentedPackage> {
        self.packages.values()
    }

    fn package_mut(&mut self, name: &str) -> &mut DocumentedPackage {
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| DocumentedPackage::new(name))
    }

    pub fn document_package(&mut self, name: &str, documentation: impl Into<String>) {
        self.package_mut(name).documentation = Some(documentation.into());
    }

    /// Set a type's documentation and explicit import list, replacing any
    /// previous values.
    pub fn document_type(
        &mut self,
        package: &str,
        qualified_name: &str,
        documentation: impl Into<String>,
        imports: Vec<String>,
    ) {
        let documented = self.package_mut(package).documented_type_mut(qualified_name);
        documented.documentation = Some(documentation.into());
        documented.imports = imports;
    }

    pub fn document_method(&mut self, package: &str, qualified_name: &str, method: DocumentedMethod) {
        self.package_mut(package)
            .documented_type_mut(qualified_name)
            .methods
            .insert(method.name.clone(), method);
    }
}

#[cfg(test)]
#[path = "../tests/docs_tests.rs"]
mod tests;
