//! Tool acquisition and caching
//!
//! A [`ToolResolver`] looks a tool up in a [`ToolCache`] keyed by
//! (name, version). On a miss it fetches the installer through a
//! [`Downloader`], runs it, and registers the produced binary in the cache so
//! later runs on the same host skip the download.

mod download;
mod resolver;
mod storage;
mod types;


pub use download::HttpDownloader;
pub use resolver::ToolResolver;
pub use storage::DirToolCache;
pub use types::{ToolReference, cache_arch, clean_version};

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::XeolResult;

/// Store of installed tools keyed by name and version
#[async_trait]
pub trait ToolCache: Send + Sync {
    /// Directory holding the cached tool, if a complete entry exists
    async fn find(&self, tool: &str, version: &str) -> Option<PathBuf>;

    /// Copy `source` into the entry for (tool, version) as `target_name`
    /// and return the entry directory
    async fn cache_file(
        &self,
        source: &Path,
        target_name: &str,
        tool: &str,
        version: &str,
    ) -> XeolResult<PathBuf>;
}

/// Fetches a URL into a local file
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str) -> XeolResult<PathBuf>;
}
