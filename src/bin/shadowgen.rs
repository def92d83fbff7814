use anyhow::Result;
use clap::Parser;

use shadowgen::cli::{args::CliArgs, driver};

fn main() -> Result<()> {
    // No-op unless SHADOWGEN_LOG or RUST_LOG is set.
    shadowgen::tracing_config::init_tracing();

    let args = CliArgs::parse();
    driver::run(&args)?;
    Ok(())
}
