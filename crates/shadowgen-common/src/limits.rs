//! Centralized limits for the model builder.
//!
//! The resolver and the scope walks are bounded by construction (declaration
//! graphs are finite and acyclic), so these limits are never hit by
//! well-formed input. They exist so a broken invariant surfaces as an error
//! instead of a hang.

/// Maximum number of disambiguation rounds the referent resolver may run.
///
/// Each round moves every unresolved type one nesting level outward, so the
/// number of rounds is bounded by the deepest nesting among registered types
/// plus one. Exceeding this value means the declaration graph contains a cycle.
pub const MAX_RESOLUTION_ROUNDS: usize = 256;

/// Maximum number of enclosing scopes followed when walking from a type to its
/// namespace.
pub const MAX_SCOPE_WALK_DEPTH: usize = 256;
