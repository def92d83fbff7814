//! Shadow binding model builder.
//!
//! Maps shadow implementations onto the platform types they stand in for and
//! computes a unique, minimally-qualified referent for every type the
//! generated registry mentions.
//!
//! - **Types** (`TypeArena`, `TypeDescriptor`): declared types, keyed by qualified name
//! - **Collector**: registers the types a set of bindings references
//! - **Referent resolver**: round-based disambiguation of simple names, plus imports
//! - **Builder / model**: `ModelBuilder` accumulates bindings, `BindingModel` is the
//!   immutable result queried by code generation
//! - **Docs**: documentation tree keyed by namespace and type
//! - **Cache**: session-owned cache of built models

pub mod binding;
pub mod builder;
pub mod cache;
pub mod collector;
pub mod docs;
pub mod error;
pub mod model;
pub mod options;
pub mod referent;
pub mod types;

pub use binding::{ResetterBinding, ResetterDecl, ShadowBinding, ShadowDecl};
pub use builder::ModelBuilder;
pub use cache::ModelCache;
pub use collector::Collector;
pub use docs::{DocumentationTree, DocumentedMethod, DocumentedPackage, DocumentedType};
pub use error::ModelError;
pub use model::{BindingModel, ModelReport, ResetterReport};
pub use options::ModelOptions;
pub use referent::{ReferentResolver, ResolvedReferents, assemble_imports};
pub use types::{Scope, TypeArena, TypeDescriptor, TypeId, TypeParam, Visibility};
