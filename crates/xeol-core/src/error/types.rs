//! Core error type for xeol-action

use thiserror::Error;

/// Result type alias for xeol-action operations
pub type XeolResult<T> = Result<T, XeolError>;

/// Main error type for xeol-action
///
/// Validation and installation errors abort the run. A scanner that exits
/// non-zero is never represented here; that is an outcome, not an error.
#[derive(Error, Debug, Clone)]
pub enum XeolError {
    /// Invalid action input (mutually exclusive targets, unknown format)
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Malformed runner environment
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Installer download failed
    #[error("Download error: {message}")]
    Download {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// Installer script, permissions or cache registration failed
    #[error("Install error: {message}")]
    Install {
        message: String,
        context: Option<String>,
    },

    /// The scanner could not be spawned or awaited
    #[error("Execution error: {program}: {message}")]
    Execution { program: String, message: String },

    /// Filesystem errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },
}
