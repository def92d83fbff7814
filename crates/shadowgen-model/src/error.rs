//! Errors reported by the model builder.

use crate::types::TypeId;
use std::fmt;

/// Failure raised while registering bindings or building the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The same shadow was bound to two distinct actual types.
    ///
    /// Recoverable: the caller rejects the second registration.
    DuplicateBinding {
        shadow: String,
        existing: String,
        attempted: String,
    },
    /// `build()` was called on a builder that already produced its model.
    AlreadyBuilt,
    /// The implicitly-available root namespace is not known to the host
    /// environment, so imports cannot be filtered correctly.
    NamespaceResolutionFailure { namespace: String },
    /// A `TypeId` that does not belong to this builder's arena.
    UnknownType { id: TypeId },
    /// An invariant of the resolver did not hold.
    InternalConsistency { detail: String },
}

impl ModelError {
    pub(crate) fn internal(detail: impl Into<String>) -> Self {
        ModelError::InternalConsistency {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::DuplicateBinding {
                shadow,
                existing,
                attempted,
            } => write!(
                f,
                "shadow {shadow} is already bound to {existing}; cannot also bind it to {attempted}"
            ),
            ModelError::AlreadyBuilt => write!(f, "binding model has already been built"),
            ModelError::NamespaceResolutionFailure { namespace } => {
                write!(f, "could not locate root namespace {namespace}")
            }
            ModelError::UnknownType { id } => {
                write!(f, "type id {} is not declared in this arena", id.0)
            }
            ModelError::InternalConsistency { detail } => {
                write!(f, "internal consistency fault: {detail}")
            }
        }
    }
}

impl std::error::Error for ModelError {}
