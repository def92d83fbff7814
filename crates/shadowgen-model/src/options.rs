//! Model builder configuration.

use serde::Deserialize;

/// Imports every generated registry needs regardless of its bindings.
pub const DEFAULT_INFRASTRUCTURE_IMPORTS: &[&str] = &[
    "java.util.HashMap",
    "java.util.Map",
    "javax.annotation.Generated",
    "org.robolectric.internal.ShadowProvider",
    "org.robolectric.shadow.api.Shadow",
];

/// Namespace owned by the generation framework. Types inside it are never
/// reported as shadowed.
pub const DEFAULT_SELF_NAMESPACE: &str = "org.robolectric";

/// Namespace whose types are in scope without an import.
pub const DEFAULT_IMPLICIT_NAMESPACE: &str = "java.lang";

/// Configuration options for the model builder.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelOptions {
    /// Reserved namespace of the generation framework itself.
    pub self_namespace: String,
    /// Root namespace that never needs imports. `None` disables both the
    /// lookup and the filter.
    pub implicit_namespace: Option<String>,
    /// Imports unioned into every model.
    pub infrastructure_imports: Vec<String>,
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            self_namespace: DEFAULT_SELF_NAMESPACE.to_string(),
            implicit_namespace: Some(DEFAULT_IMPLICIT_NAMESPACE.to_string()),
            infrastructure_imports: DEFAULT_INFRASTRUCTURE_IMPORTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
