//! Directory-backed tool cache
//!
//! Layout matches the runner tool cache so entries are shared with other
//! steps: `<root>/<tool>/<version>/<arch>/`, valid once the sibling marker
//! `<arch>.complete` exists.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::ToolCache;
use super::types::{cache_arch, clean_version};
use crate::error::{XeolError, XeolResult};

/// Tool cache rooted at a directory
#[derive(Debug, Clone)]
pub struct DirToolCache {
    root: PathBuf,
    arch: String,
}

impl DirToolCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            arch: cache_arch().to_string(),
        }
    }

    /// Use a specific architecture directory instead of the host's
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Entry directory for (tool, version), or `None` if either is blank
    pub fn entry_dir(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let version = clean_version(version);
        if tool.trim().is_empty() || version.is_empty() {
            return None;
        }
        Some(self.root.join(tool).join(version).join(&self.arch))
    }

    fn marker_path(entry: &Path) -> PathBuf {
        let mut marker = entry.as_os_str().to_owned();
        marker.push(".complete");
        PathBuf::from(marker)
    }
}

#[async_trait]
impl ToolCache for DirToolCache {
    async fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let entry = self.entry_dir(tool, version)?;
        let marker = Self::marker_path(&entry);

        let complete = fs::try_exists(&marker).await.unwrap_or(false);
        let present = fs::try_exists(&entry).await.unwrap_or(false);
        if complete && present {
            tracing::debug!(tool, version, path = %entry.display(), "tool cache hit");
            Some(entry)
        } else {
            tracing::debug!(tool, version, "tool cache miss");
            None
        }
    }

    async fn cache_file(
        &self,
        source: &Path,
        target_name: &str,
        tool: &str,
        version: &str,
    ) -> XeolResult<PathBuf> {
        let entry = self.entry_dir(tool, version).ok_or_else(|| {
            XeolError::install(format!(
                "Cannot cache {} without a tool name and version",
                source.display()
            ))
        })?;
        let marker = Self::marker_path(&entry);

        if fs::try_exists(&marker).await.unwrap_or(false) {
            fs::remove_file(&marker)
                .await
                .map_err(|e| XeolError::io(&marker, e))?;
        }
        if fs::try_exists(&entry).await.unwrap_or(false) {
            fs::remove_dir_all(&entry)
                .await
                .map_err(|e| XeolError::io(&entry, e))?;
        }
        fs::create_dir_all(&entry)
            .await
            .map_err(|e| XeolError::io(&entry, e))?;

        let target = entry.join(target_name);
        fs::copy(source, &target).await.map_err(|e| {
            XeolError::install_with_context(
                format!("Failed to copy {} into the tool cache: {}", source.display(), e),
                target.display().to_string(),
            )
        })?;
        fs::write(&marker, b"")
            .await
            .map_err(|e| XeolError::io(&marker, e))?;

        tracing::info!(tool, version, path = %entry.display(), "cached tool");
        Ok(entry)
    }
}
