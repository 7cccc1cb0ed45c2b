//! xeol-action CLI
//!
//! Runs as a CI step. Workflow commands go to stdout, internal diagnostics
//! go to stderr through `tracing`.

mod args;
mod router;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use xeol_core::RunnerEnvironment;

use crate::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let runner = RunnerEnvironment::load_from_env();

    // RUST_LOG wins; otherwise follow the runner debug flag
    let default_level = if runner.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    router::route(cli, runner).await
}
