//! Tool cache key types

use std::path::PathBuf;

/// A tool identified by name and version, with its install directory once known
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolReference {
    pub name: String,
    pub version: String,
    /// Cache directory holding the binary
    pub installed_path: Option<PathBuf>,
}

impl ToolReference {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            installed_path: None,
        }
    }

    pub fn with_installed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.installed_path = Some(path.into());
        self
    }

    /// Full path of the binary, named after the tool, inside the install directory
    pub fn binary_path(&self) -> Option<PathBuf> {
        self.installed_path.as_ref().map(|dir| dir.join(&self.name))
    }
}

/// Normalize a version for use as a cache key: `" v0.10.1 "` -> `"0.10.1"`
pub fn clean_version(version: &str) -> String {
    let version = version.trim();
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('='))
        .unwrap_or(version)
        .to_string()
}

/// Architecture directory name used by the runner tool cache
pub fn cache_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "x86",
        other => other,
    }
}
