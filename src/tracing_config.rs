//! Tracing setup for the shadowgen binary.
//!
//! `SHADOWGEN_LOG` (or `RUST_LOG`) takes ordinary `EnvFilter` directives plus
//! two shorthands for the model builder:
//!
//! - `resolver`: every referent round and every collected type
//! - `build`: registration and the `build` span
//!
//! `SHADOWGEN_LOG_FORMAT` picks the output: `text` (default), `tree` or `json`.
//!
//! ```bash
//! SHADOWGEN_LOG=resolver SHADOWGEN_LOG_FORMAT=tree shadowgen manifest.json
//! SHADOWGEN_LOG="build,shadowgen::cli=info" shadowgen manifest.json
//! ```
//!
//! Output always goes to stderr; stdout carries the model.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Directives the `resolver` shorthand expands to.
const RESOLVER_DIRECTIVES: &str = "shadowgen_model::referent=debug,shadowgen_model::collector=trace";

/// Directives the `build` shorthand expands to.
const BUILD_DIRECTIVES: &str = "shadowgen_model::builder=debug,shadowgen_model::types=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `SHADOWGEN_LOG_FORMAT` value. Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Replace the `resolver` and `build` shorthands with their directives.
pub fn expand_directives(value: &str) -> String {
    value
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .map(|directive| match directive {
            "resolver" => RESOLVER_DIRECTIVES,
            "build" => BUILD_DIRECTIVES,
            other => other,
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn build_filter() -> Option<EnvFilter> {
    let directives = std::env::var("SHADOWGEN_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()?;
    Some(EnvFilter::builder().parse_lossy(expand_directives(&directives)))
}

/// Install the global subscriber. Does nothing unless `SHADOWGEN_LOG` or
/// `RUST_LOG` is set.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };
    let format = LogFormat::parse(&std::env::var("SHADOWGEN_LOG_FORMAT").unwrap_or_default());

    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_bracketed_fields(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            // Span close events carry the time spent in `build`.
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
