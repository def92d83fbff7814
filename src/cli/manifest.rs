//! Declaration manifests.
//!
//! A manifest is the scanner's hand-off: every declared type, every shadow
//! and reset-hook declaration, and any documentation, as JSON. Types refer to
//! each other by qualified name and may appear in any order.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use shadowgen_common::simple_name_of;
use shadowgen_model::{
    DocumentedMethod, ModelBuilder, ModelError, Scope, TypeId, TypeParam, Visibility,
};

fn default_true() -> bool {
    true
}

fn default_visibility() -> Visibility {
    Visibility::Public
}

fn unbounded() -> i32 {
    -1
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Namespaces present in the host environment beyond those of `types`.
    #[serde(default)]
    pub namespaces: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub shadows: Vec<ShadowEntry>,
    #[serde(default)]
    pub resetters: Vec<ResetterEntry>,
    #[serde(default)]
    pub extra_shadows: Vec<ExtraShadowEntry>,
    #[serde(default)]
    pub docs: DocsEntry,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Enclosing {
    Namespace(String),
    Type(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    pub qualified_name: String,
    /// Defaults to the last segment of `qualified_name`.
    #[serde(default)]
    pub simple_name: Option<String>,
    pub enclosing: Enclosing,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default)]
    pub type_params: Vec<TypeParamEntry>,
}

impl TypeEntry {
    fn simple_name(&self) -> &str {
        self.simple_name
            .as_deref()
            .unwrap_or_else(|| simple_name_of(&self.qualified_name))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParamEntry {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEntry {
    pub shadow: String,
    pub actual: String,
    #[serde(default = "default_true")]
    pub core: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default = "default_true")]
    pub actual_public: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetterEntry {
    pub shadow: String,
    pub method: String,
    #[serde(default = "unbounded")]
    pub min_version: i32,
    #[serde(default = "unbounded")]
    pub max_version: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraShadowEntry {
    pub actual: String,
    pub shadow: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocsEntry {
    #[serde(default)]
    pub packages: Vec<PackageDocEntry>,
    #[serde(default)]
    pub types: Vec<TypeDocEntry>,
    #[serde(default)]
    pub methods: Vec<MethodDocEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDocEntry {
    pub name: String,
    pub documentation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDocEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub documentation: String,
    #[serde(default)]
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDocEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default = "unbounded")]
    pub min_version: i32,
    #[serde(default = "unbounded")]
    pub max_version: i32,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid manifest {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Feed every declaration into `builder`.
    ///
    /// Conflicting shadow bindings are rejected and returned rather than
    /// failing the whole manifest; every other problem is an error.
    pub fn populate(&self, builder: &mut ModelBuilder) -> Result<Vec<ModelError>> {
        self.declare_types(builder)?;

        let mut rejected = Vec::new();
        for entry in &self.shadows {
            let shadow = lookup(builder, &entry.shadow)?;
            let actual = lookup(builder, &entry.actual)?;
            match builder.add_shadow_binding(
                shadow,
                actual,
                entry.core,
                entry.deprecated,
                entry.actual_public,
            ) {
                Ok(()) => {}
                Err(err @ ModelError::DuplicateBinding { .. }) => {
                    warn!(error = %err, "rejected shadow binding");
                    rejected.push(err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        for entry in &self.resetters {
            let shadow = lookup(builder, &entry.shadow)?;
            builder.add_resetter_binding(
                shadow,
                &entry.method,
                entry.min_version,
                entry.max_version,
            )?;
        }

        for entry in &self.extra_shadows {
            builder.add_extra_shadow(&entry.actual, &entry.shadow)?;
        }

        for entry in &self.docs.packages {
            builder.document_package(&entry.name, &entry.documentation)?;
        }
        for entry in &self.docs.types {
            let id = lookup(builder, &entry.type_name)?;
            builder.document_type(id, &entry.documentation, entry.imports.clone())?;
        }
        for entry in &self.docs.methods {
            let id = lookup(builder, &entry.type_name)?;
            let mut method = DocumentedMethod::new(&entry.name)
                .with_params(entry.params.iter().cloned())
                .with_versions(entry.min_version, entry.max_version);
            if let Some(doc) = &entry.documentation {
                method = method.with_documentation(doc.clone());
            }
            if let Some(ret) = &entry.return_type {
                method = method.with_return_type(ret.clone());
            }
            builder.document_method(id, method)?;
        }

        Ok(rejected)
    }

    /// Declare types so that every enclosing type precedes its members, then
    /// attach generic parameters once every bound can be looked up.
    fn declare_types(&self, builder: &mut ModelBuilder) -> Result<()> {
        let types = builder.types_mut();
        for ns in &self.namespaces {
            types.declare_namespace(ns.clone());
        }

        let mut pending: Vec<&TypeEntry> = self.types.iter().collect();
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for entry in pending {
                let scope = match &entry.enclosing {
                    Enclosing::Namespace(ns) => Scope::Namespace(ns.clone()),
                    Enclosing::Type(parent) => match types.lookup(parent) {
                        Some(parent_id) => Scope::Type(parent_id),
                        None => {
                            deferred.push(entry);
                            continue;
                        }
                    },
                };
                let id = types.declare(scope, entry.simple_name(), entry.visibility)?;
                let declared = &types.try_get(id)?.qualified_name;
                if declared != &entry.qualified_name {
                    bail!(
                        "type {} resolves to {} from its enclosing scope",
                        entry.qualified_name,
                        declared
                    );
                }
            }
            if deferred.len() == before {
                let missing: Vec<String> = deferred
                    .iter()
                    .map(|entry| match &entry.enclosing {
                        Enclosing::Type(parent) => {
                            format!("{parent} (for {})", entry.qualified_name)
                        }
                        Enclosing::Namespace(_) => entry.qualified_name.clone(),
                    })
                    .collect();
                bail!("enclosing types are not declared: {}", missing.join(", "));
            }
            pending = deferred;
        }

        for entry in &self.types {
            let Some(id) = types.lookup(&entry.qualified_name) else {
                bail!("type {} was not declared", entry.qualified_name);
            };
            for param in &entry.type_params {
                let mut bounds = Vec::with_capacity(param.bounds.len());
                for bound in &param.bounds {
                    match types.lookup(bound) {
                        Some(bound_id) => bounds.push(bound_id),
                        None => bail!(
                            "bound {bound} of {}<{}> is not declared",
                            entry.qualified_name,
                            param.name
                        ),
                    }
                }
                types.add_type_param(id, TypeParam::with_bounds(param.name.clone(), bounds))?;
            }
        }
        Ok(())
    }
}

fn lookup(builder: &ModelBuilder, qualified_name: &str) -> Result<TypeId> {
    builder
        .types()
        .lookup(qualified_name)
        .with_context(|| format!("type {qualified_name} is not declared in the manifest"))
}
