//! Executable search path additions

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{XeolError, XeolResult};

/// Directories added to `PATH` during this run, most recent first
///
/// The process environment is never modified; child processes receive the
/// combined value from [`SearchPath::join_with`].
#[derive(Debug, Default)]
pub struct SearchPath {
    added: Mutex<Vec<PathBuf>>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `dir` in front of the search path. Returns false if it was already there.
    pub fn prepend(&self, dir: &Path) -> XeolResult<bool> {
        env::join_paths([dir]).map_err(|e| {
            XeolError::install_with_context(
                format!("Cannot add {} to PATH: {}", dir.display(), e),
                "add_path",
            )
        })?;

        let mut added = self.added.lock();
        if added.iter().any(|existing| existing == dir) {
            return Ok(false);
        }
        added.insert(0, dir.to_path_buf());
        Ok(true)
    }

    /// Directories added so far, most recent first
    pub fn added(&self) -> Vec<PathBuf> {
        self.added.lock().clone()
    }

    /// Combine the added directories with a base `PATH` value
    pub fn join_with(&self, base: Option<OsString>) -> Option<OsString> {
        let added = self.added();
        if added.is_empty() {
            return base;
        }

        let base_entries: Vec<PathBuf> = base
            .as_ref()
            .map(|b| env::split_paths(b).collect())
            .unwrap_or_default();
        match env::join_paths(added.iter().chain(base_entries.iter())) {
            Ok(joined) => Some(joined),
            Err(e) => {
                tracing::warn!(error = %e, "cannot join search path, using base PATH");
                base
            }
        }
    }
}
