//! Validated scan configuration

use std::fmt;

use super::inputs::ActionInputs;
use crate::error::{XeolError, XeolResult};
use crate::source::ScanTarget;

/// Output formats the action knows how to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse an `output-format` input, ignoring case
    pub fn parse(value: &str) -> XeolResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(XeolError::invalid_input_field(
                format!(
                    "Invalid output-format value is set to {} - please ensure you are choosing either json or table",
                    value
                ),
                "output-format",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a single scan run needs. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub target: ScanTarget,
    pub fail_build: bool,
    pub api_key: Option<String>,
    pub output_format: OutputFormat,
    /// Runner debug mode; doubles xeol's verbosity
    pub verbose: bool,
    pub registry_user: Option<String>,
    pub registry_pass: Option<String>,
}

impl ScanConfig {
    /// Create a config with defaults for everything but the target and format
    pub fn new(target: ScanTarget, output_format: OutputFormat) -> Self {
        Self {
            target,
            fail_build: true,
            api_key: None,
            output_format,
            verbose: false,
            registry_user: None,
            registry_pass: None,
        }
    }

    /// Validate the remaining inputs for a target already selected with
    /// [`ActionInputs::scan_target`]
    pub fn from_target(
        target: ScanTarget,
        inputs: &ActionInputs,
        verbose: bool,
    ) -> XeolResult<Self> {
        let output_format = OutputFormat::parse(inputs.output_format())?;

        Ok(Self {
            target,
            fail_build: inputs.fail_build(),
            api_key: inputs.api_key.clone(),
            output_format,
            verbose,
            registry_user: inputs.registry_username.clone(),
            registry_pass: inputs.registry_password.clone(),
        })
    }

    /// True when at least one registry credential was supplied
    pub fn has_registry_credentials(&self) -> bool {
        self.registry_user.is_some() || self.registry_pass.is_some()
    }

    /// Values that must never appear in the log
    pub fn secrets(&self) -> impl Iterator<Item = &str> {
        self.api_key
            .as_deref()
            .into_iter()
            .chain(self.registry_pass.as_deref())
    }
}
