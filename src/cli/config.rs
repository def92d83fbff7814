use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::args::CliArgs;
use shadowgen_model::ModelOptions;

/// Read model options from a JSON file. Missing keys keep their defaults.
pub fn load_options(path: &Path) -> Result<ModelOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_options(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_options(text: &str) -> Result<ModelOptions> {
    Ok(serde_json::from_str(text)?)
}

/// Options for this invocation: the config file (or defaults) with
/// command-line overrides applied.
pub fn resolve_options(args: &CliArgs) -> Result<ModelOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => ModelOptions::default(),
    };
    if let Some(ns) = &args.self_namespace {
        options.self_namespace = ns.clone();
    }
    if args.no_implicit_namespace {
        options.implicit_namespace = None;
    }
    Ok(options)
}
