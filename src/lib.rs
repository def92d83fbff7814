//! shadowgen - builds the shadow binding model for registry code generation.
//!
//! The heavy lifting lives in `shadowgen-model`; this crate adds the
//! command-line surface: declaration manifests, option files, and tracing.

pub use shadowgen_model as model;

pub mod cli;
pub mod tracing_config;
