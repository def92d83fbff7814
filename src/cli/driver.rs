use anyhow::{Context, Result};
use std::io::Write;
use tracing::{info, warn};

use crate::cli::args::CliArgs;
use crate::cli::config::resolve_options;
use crate::cli::manifest::Manifest;
use shadowgen_model::{BindingModel, ModelBuilder, ModelError, ModelOptions};

#[derive(Debug)]
pub struct BuildOutcome {
    pub model: BindingModel,
    /// Shadow bindings dropped because their shadow was already bound.
    pub rejected: Vec<ModelError>,
}

pub fn build_model(manifest: &Manifest, options: ModelOptions) -> Result<BuildOutcome> {
    let mut builder = ModelBuilder::new(options);
    let rejected = manifest.populate(&mut builder)?;
    let model = builder.build().context("failed to build binding model")?;
    info!(
        bindings = model.all_bindings().count(),
        imports = model.imports().len(),
        rounds = model.resolution_rounds(),
        "built binding model"
    );
    Ok(BuildOutcome { model, rejected })
}

pub fn render(model: &BindingModel, pretty: bool) -> Result<String> {
    let report = model.report();
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

pub fn run(args: &CliArgs) -> Result<BuildOutcome> {
    let options = resolve_options(args)?;
    let manifest = Manifest::load(&args.manifest)?;
    let outcome = build_model(&manifest, options)?;
    if !outcome.rejected.is_empty() {
        warn!(count = outcome.rejected.len(), "some shadow bindings were rejected");
    }

    let mut json = render(&outcome.model, args.pretty)?;
    json.push('\n');
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(json.as_bytes())
            .context("failed to write model to stdout")?,
    }
    Ok(outcome)
}
