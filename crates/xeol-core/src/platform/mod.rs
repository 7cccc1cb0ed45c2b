//! CI platform abstraction
//!
//! Everything the action shows or publishes on the pipeline goes through
//! [`ActionPlatform`]: log lines, warnings, failure, named outputs, secret
//! masking and search path additions. This keeps the core logic free of
//! runner-specific I/O and lets tests record what a run produced.

mod commands;
mod github;
mod recording;
mod search_path;

pub use commands::{escape_data, escape_property, format_command};
pub use github::GithubPlatform;
pub use recording::{PlatformEvent, RecordingPlatform};
pub use search_path::SearchPath;

use std::ffi::OsString;
use std::path::Path;

use crate::error::XeolResult;

/// Input/output plumbing of the CI platform
pub trait ActionPlatform: Send + Sync {
    /// Whether the runner is in debug mode
    fn is_debug(&self) -> bool;

    /// Informational log line
    fn info(&self, message: &str);

    /// Debug log line, only shown when debugging is enabled on the runner
    fn debug(&self, message: &str);

    /// Non-fatal warning annotation
    fn warning(&self, message: &str);

    /// Error annotation
    fn error(&self, message: &str);

    /// Log an error and mark the run as failed
    fn set_failed(&self, message: &str);

    /// Whether [`ActionPlatform::set_failed`] was called
    fn has_failed(&self) -> bool;

    /// Publish a named result
    fn set_output(&self, name: &str, value: &str) -> XeolResult<()>;

    /// Register a value to be masked in the log
    fn set_secret(&self, secret: &str);

    /// Add a directory to the executable search path for this and later steps
    fn add_path(&self, dir: &Path) -> XeolResult<()>;

    /// `PATH` value for child processes, including added directories
    fn search_path(&self) -> Option<OsString>;

    /// Start a collapsible log group
    fn start_group(&self, name: &str);

    /// End the current log group
    fn end_group(&self);
}
