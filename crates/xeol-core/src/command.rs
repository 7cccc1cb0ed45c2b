//! xeol command line construction
//!
//! Argument order is fixed: `[-vv] -o <format> [--fail-on-eol-found]
//! [--api-key <key>] <target>`. Log scrapers depend on it.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;

use tracing::warn;

use crate::config::ScanConfig;
use crate::platform::ActionPlatform;
use crate::process::{ProcessCommand, StdoutMode};

/// Disables xeol's own update check
pub const CHECK_FOR_APP_UPDATE_ENV: &str = "XEOL_CHECK_FOR_APP_UPDATE";
pub const REGISTRY_USERNAME_ENV: &str = "XEOL_REGISTRY_AUTH_USERNAME";
pub const REGISTRY_PASSWORD_ENV: &str = "XEOL_REGISTRY_AUTH_PASSWORD";

/// A fully prepared xeol run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanInvocation {
    pub binary_path: String,
    pub args: Vec<String>,
    pub environment: HashMap<String, String>,
}

impl ScanInvocation {
    /// `xeol -o json dir:.`
    pub fn command_line(&self) -> String {
        std::iter::once(self.binary_path.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Process command that captures stdout without echoing it
    pub fn to_process_command(&self) -> ProcessCommand {
        ProcessCommand::new(self.binary_path.clone())
            .args(self.args.iter().cloned())
            .env(self.environment.clone())
            .stdout(StdoutMode::Capture)
    }
}

/// Argument list for a scan, in the fixed order
pub fn build_args(config: &ScanConfig) -> Vec<String> {
    let mut args = Vec::new();

    if config.verbose {
        args.push("-vv".to_string());
    }

    args.push("-o".to_string());
    args.push(config.output_format.as_str().to_string());

    if config.fail_build {
        args.push("--fail-on-eol-found".to_string());
    }

    if let Some(api_key) = &config.api_key {
        args.push("--api-key".to_string());
        args.push(api_key.clone());
    }

    args.push(config.target.to_string());
    args
}

/// The current process environment with `PATH` taken from the platform
pub fn inherited_environment(platform: &dyn ActionPlatform) -> HashMap<String, String> {
    let (mut environment, dropped) = unicode_environment(env::vars_os());
    if !dropped.is_empty() {
        warn!(
            ?dropped,
            "environment variables that are not valid UTF-8 are not passed to xeol"
        );
    }

    if let Some(path) = platform.search_path() {
        match path.into_string() {
            Ok(path) => {
                environment.insert("PATH".to_string(), path);
            }
            Err(path) => warn!(?path, "search path is not valid UTF-8, keeping PATH"),
        }
    }
    environment
}

/// Split variables into a UTF-8 map and the names of those that are not
fn unicode_environment<I>(vars: I) -> (HashMap<String, String>, Vec<OsString>)
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut environment = HashMap::new();
    let mut dropped = Vec::new();

    for (key, value) in vars {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                environment.insert(key, value);
            }
            (Ok(key), Err(_)) => dropped.push(OsString::from(key)),
            (Err(key), _) => dropped.push(key),
        }
    }
    (environment, dropped)
}

/// Builds [`ScanInvocation`]s on top of a base environment
pub struct CommandBuilder {
    base_environment: HashMap<String, String>,
}

impl CommandBuilder {
    /// Builder inheriting the current process environment
    pub fn new(platform: &dyn ActionPlatform) -> Self {
        Self {
            base_environment: inherited_environment(platform),
        }
    }

    /// Replace the inherited environment
    pub fn with_base_environment(mut self, environment: HashMap<String, String>) -> Self {
        self.base_environment = environment;
        self
    }

    pub fn build(&self, config: &ScanConfig, binary: &str) -> ScanInvocation {
        let mut environment = self.base_environment.clone();
        environment.insert(CHECK_FOR_APP_UPDATE_ENV.to_string(), "false".to_string());

        if config.has_registry_credentials() {
            environment.insert(
                REGISTRY_USERNAME_ENV.to_string(),
                config.registry_user.clone().unwrap_or_default(),
            );
            environment.insert(
                REGISTRY_PASSWORD_ENV.to_string(),
                config.registry_pass.clone().unwrap_or_default(),
            );
        }

        ScanInvocation {
            binary_path: binary.to_string(),
            args: build_args(config),
            environment,
        }
    }
}
