//! Error codes and bare messages for XeolError

use super::types::XeolError;

impl XeolError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &str {
        match self {
            Self::InvalidInput { .. } => "XEOL_INVALID_INPUT",
            Self::Config { .. } => "XEOL_CONFIG",
            Self::Download { .. } => "XEOL_DOWNLOAD",
            Self::Install { .. } => "XEOL_INSTALL",
            Self::Execution { .. } => "XEOL_EXECUTION",
            Self::Io { .. } => "XEOL_IO",
        }
    }

    /// Get the bare message, without the category prefix used by `Display`
    ///
    /// This is the text reported as the run's failure reason, so validation
    /// messages must pass through unchanged.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. } => message,
            Self::Config { message } => message,
            Self::Download { message, .. } => message,
            Self::Install { message, .. } => message,
            Self::Execution { message, .. } => message,
            Self::Io { message, .. } => message,
        }
    }

    /// Check if this error was caused by the action's inputs
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
