//! xeol-action core library
//!
//! Installs the xeol end-of-life scanner through the runner tool cache, runs
//! it against one scan target and turns its exit status and output into
//! pipeline results.

pub mod action;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod platform;
pub mod process;
pub mod reporter;
pub mod source;
pub mod tool_cache;

// Re-export commonly used types
pub use action::ScanAction;
pub use command::{CommandBuilder, ScanInvocation};
pub use config::{ActionInputs, OutputFormat, RunMode, RunnerEnvironment, ScanConfig};
pub use error::{XeolError, XeolResult};
pub use executor::{ScanExecutor, ScanOutcome};
pub use platform::{ActionPlatform, GithubPlatform, RecordingPlatform};
pub use reporter::{ActionOutputs, Report, ResultReporter, Verdict};
pub use source::{ScanTarget, select_target};
pub use tool_cache::{DirToolCache, HttpDownloader, ToolReference, ToolResolver};
