//! Entrypoint routing

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;
use xeol_core::{ActionInputs, ActionPlatform, GithubPlatform, RunnerEnvironment, ScanAction};

use crate::args::Cli;

/// Load inputs, run the selected entrypoint and map the result to an exit code
pub async fn route(cli: Cli, runner: RunnerEnvironment) -> anyhow::Result<ExitCode> {
    let mut inputs = ActionInputs::load_from_env();
    inputs.merge(cli.into_inputs());
    debug!(mode = ?inputs.run_mode(), version = inputs.xeol_version(), "inputs loaded");

    let platform = Arc::new(GithubPlatform::new(&runner));
    let action = ScanAction::from_runner(&runner, platform.clone(), inputs)
        .context("failed to set up the action")?;
    action.execute().await;

    Ok(exit_code(platform.as_ref()))
}

/// 1 when the run was marked failed, 0 otherwise
pub fn exit_code(platform: &dyn ActionPlatform) -> ExitCode {
    if platform.has_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
