//! Scan execution

use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::command::ScanInvocation;
use crate::error::XeolResult;
use crate::platform::ActionPlatform;
use crate::process::ProcessRunner;

/// Log group wrapping the scanner run
pub const OUTPUT_GROUP: &str = "xeol output...";

/// What a scan run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub exit_code: i32,
    pub captured_stdout: String,
    /// Set by the reporter once the json report has been written
    pub report_file_path: Option<PathBuf>,
}

impl ScanOutcome {
    pub fn new(exit_code: i32, captured_stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            captured_stdout: captured_stdout.into(),
            report_file_path: None,
        }
    }
}

/// Runs a [`ScanInvocation`] inside the `xeol output...` log group
pub struct ScanExecutor<'a> {
    platform: &'a dyn ActionPlatform,
}

impl<'a> ScanExecutor<'a> {
    pub fn new(platform: &'a dyn ActionPlatform) -> Self {
        Self { platform }
    }

    /// Run the scanner to completion
    ///
    /// A non-zero exit status is part of the outcome. Only a failure to start
    /// or await the scanner is an error.
    #[instrument(skip_all, fields(binary = %invocation.binary_path))]
    pub async fn execute(&self, invocation: &ScanInvocation) -> XeolResult<ScanOutcome> {
        self.platform.start_group(OUTPUT_GROUP);
        self.platform
            .info(&format!("Executing: {}", invocation.command_line()));

        let result = ProcessRunner::new(self.platform)
            .run(&invocation.to_process_command())
            .await;
        self.platform.end_group();

        let output = result?;
        debug!(exit_code = output.exit_code, bytes = output.stdout.len(), "scan finished");

        if self.platform.is_debug() {
            self.platform.debug("Xeol output:");
            self.platform.debug(&output.stdout);
        }

        Ok(ScanOutcome::new(output.exit_code, output.stdout))
    }
}
