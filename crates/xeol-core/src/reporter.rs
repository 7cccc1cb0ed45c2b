//! Interpreting a finished scan
//!
//! The reporter never looks inside the scanner output. It only decides where
//! the text goes (report file or log) and what the exit code means for the
//! pipeline.

use std::path::PathBuf;

use tokio::fs;
use tracing::{info, instrument};

use crate::config::defaults::{EOL_FOUND_MESSAGE, REPORT_FILE};
use crate::config::{OutputFormat, ScanConfig};
use crate::error::{XeolError, XeolResult};
use crate::executor::ScanOutcome;
use crate::platform::ActionPlatform;

/// How the run ended from the pipeline's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// EOL packages were found but the build is allowed to continue
    Warned,
    Failed,
}

/// Named results of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutputs {
    /// Path of the json report
    pub report: Option<String>,
    /// Path of the xeol binary, download-xeol only
    pub cmd: Option<String>,
}

impl ActionOutputs {
    /// Publish every set result through the platform
    pub fn publish(&self, platform: &dyn ActionPlatform) -> XeolResult<()> {
        if let Some(report) = &self.report {
            platform.set_output("report", report)?;
        }
        if let Some(cmd) = &self.cmd {
            platform.set_output("cmd", cmd)?;
        }
        Ok(())
    }
}

/// What [`ResultReporter::report`] decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub verdict: Verdict,
    pub outputs: ActionOutputs,
    pub outcome: ScanOutcome,
}

pub struct ResultReporter {
    report_path: PathBuf,
}

impl Default for ResultReporter {
    fn default() -> Self {
        Self::new(REPORT_FILE)
    }
}

impl ResultReporter {
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: report_path.into(),
        }
    }

    #[instrument(skip_all, fields(exit_code = outcome.exit_code, format = %config.output_format))]
    pub async fn report(
        &self,
        mut outcome: ScanOutcome,
        config: &ScanConfig,
        platform: &dyn ActionPlatform,
    ) -> XeolResult<Report> {
        let mut outputs = ActionOutputs::default();

        match config.output_format {
            OutputFormat::Json => {
                fs::write(&self.report_path, outcome.captured_stdout.as_bytes())
                    .await
                    .map_err(|e| XeolError::io(&self.report_path, e))?;
                info!(path = %self.report_path.display(), "report written");
                outputs.report = Some(self.report_path.to_string_lossy().into_owned());
                outcome.report_file_path = Some(self.report_path.clone());
            }
            OutputFormat::Table => platform.info(&outcome.captured_stdout),
        }

        let verdict = if outcome.exit_code > 0 {
            if config.fail_build {
                platform.set_failed(EOL_FOUND_MESSAGE);
                Verdict::Failed
            } else {
                platform.warning(EOL_FOUND_MESSAGE);
                Verdict::Warned
            }
        } else {
            Verdict::Passed
        };

        Ok(Report {
            verdict,
            outputs,
            outcome,
        })
    }
}
