use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the shadowgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "shadowgen",
    version,
    about = "Build the shadow binding model for a generated registry"
)]
pub struct CliArgs {
    /// Declaration manifest produced by the scanner (JSON).
    pub manifest: PathBuf,

    /// Model options file (JSON).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write the model to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Override the framework's reserved namespace.
    #[arg(long = "self-namespace")]
    pub self_namespace: Option<String>,

    /// Skip the implicit root namespace lookup and import filter.
    #[arg(long = "no-implicit-namespace")]
    pub no_implicit_namespace: bool,

    /// Pretty-print the JSON model.
    #[arg(long)]
    pub pretty: bool,
}
