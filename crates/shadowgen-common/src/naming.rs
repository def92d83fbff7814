//! Qualified-name helpers.
//!
//! Names in the host type system are dot-separated (`a.b.Outer.Inner`).
//! Runtime-loadable ("binary") names separate nested types with `$`
//! (`a.b.Outer$Inner`).

/// Join a qualifier and a simple name with a dot.
///
/// An empty qualifier (the unnamed namespace) yields the simple name unchanged.
pub fn join_qualified(qualifier: &str, simple: &str) -> String {
    if qualifier.is_empty() {
        simple.to_string()
    } else {
        let mut out = String::with_capacity(qualifier.len() + 1 + simple.len());
        out.push_str(qualifier);
        out.push('.');
        out.push_str(simple);
        out
    }
}

/// Returns true if `namespace` is `root` itself or nested inside it.
///
/// `org.example.sub` is within `org.example`; `org.examples` is not.
pub fn is_within_namespace(namespace: &str, root: &str) -> bool {
    match namespace.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Build a binary name from a namespace and the simple names of a type's
/// nesting chain, outermost first.
pub fn binary_name<S: AsRef<str>>(namespace: &str, nesting: &[S]) -> String {
    let mut nested = String::new();
    for (i, part) in nesting.iter().enumerate() {
        if i > 0 {
            nested.push('$');
        }
        nested.push_str(part.as_ref());
    }
    join_qualified(namespace, &nested)
}

/// The last dot-separated segment of a qualified name.
pub fn simple_name_of(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(pos) => &qualified[pos + 1..],
        None => qualified,
    }
}

#[cfg(test)]
#[path = "../tests/naming_tests.rs"]
mod tests;
