//! Common utilities for the shadowgen crates.
//!
//! This crate provides the small pieces shared between the model builder and
//! the CLI:
//! - Qualified-name helpers (`join_qualified`, `is_within_namespace`, binary names)
//! - Centralized limits for the resolver and scope walks

// Qualified / binary name helpers
pub mod naming;
pub use naming::{binary_name, is_within_namespace, join_qualified, simple_name_of};

// Centralized limits and thresholds
pub mod limits;
