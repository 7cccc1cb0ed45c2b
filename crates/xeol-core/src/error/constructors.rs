//! Constructor methods for XeolError

use std::path::Path;

use super::types::XeolError;

impl XeolError {
    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid input error naming the offending input
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a download error for a URL
    pub fn download(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Download {
            message: message.into(),
            url: Some(url.into()),
            status_code: None,
        }
    }

    /// Create a download error from a non-success HTTP status
    pub fn download_status(url: impl Into<String>, status_code: u16) -> Self {
        let url = url.into();
        Self::Download {
            message: format!("Unexpected HTTP response: {} from {}", status_code, url),
            url: Some(url),
            status_code: Some(status_code),
        }
    }

    /// Create a new install error
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
            context: None,
        }
    }

    /// Create an install error with context
    pub fn install_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new execution error
    pub fn execution(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create an IO error bound to a path
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        Self::Io {
            message: format!("{}: {}", path, err),
            path: Some(path),
        }
    }
}

impl From<std::io::Error> for XeolError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<reqwest::Error> for XeolError {
    fn from(err: reqwest::Error) -> Self {
        Self::Download {
            message: err.to_string(),
            url: err.url().map(|u| u.to_string()),
            status_code: err.status().map(|s| s.as_u16()),
        }
    }
}
