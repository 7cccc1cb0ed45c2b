//! Tool resolution: cache lookup, then download and install on a miss

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info, instrument};

use super::types::ToolReference;
use super::{Downloader, ToolCache};
use crate::config::defaults::INSTALLER_URL;
use crate::error::{XeolError, XeolResult};
use crate::platform::ActionPlatform;
use crate::process::{ProcessCommand, ProcessRunner, StdoutMode};

/// Finds or installs a tool version and puts it on the search path
pub struct ToolResolver {
    cache: Arc<dyn ToolCache>,
    downloader: Arc<dyn Downloader>,
    installer_url: String,
}

impl ToolResolver {
    pub fn new(cache: Arc<dyn ToolCache>, downloader: Arc<dyn Downloader>) -> Self {
        Self {
            cache,
            downloader,
            installer_url: INSTALLER_URL.to_string(),
        }
    }

    /// Fetch the installer script from somewhere else
    pub fn with_installer_url(mut self, url: impl Into<String>) -> Self {
        self.installer_url = url.into();
        self
    }

    /// Resolve `name` at `version`, installing it if the cache has no entry
    ///
    /// The returned reference always carries the cache directory, which has
    /// also been added to the platform search path.
    #[instrument(skip(self, platform))]
    pub async fn resolve(
        &self,
        name: &str,
        version: &str,
        platform: &dyn ActionPlatform,
    ) -> XeolResult<ToolReference> {
        let dir = match self.cache.find(name, version).await {
            Some(dir) => dir,
            None => {
                platform.debug(&format!("Installing {}", version));
                self.install(name, version, platform).await?
            }
        };

        platform.add_path(&dir)?;
        Ok(ToolReference::new(name, version).with_installed_path(dir))
    }

    async fn install(
        &self,
        name: &str,
        version: &str,
        platform: &dyn ActionPlatform,
    ) -> XeolResult<PathBuf> {
        let script = self.downloader.download(&self.installer_url).await?;
        make_executable(&script).await?;

        let install_dir = install_dir(&script);
        let command = ProcessCommand::new(script.to_string_lossy())
            .args([
                "-b".to_string(),
                install_dir.to_string_lossy().into_owned(),
                version.to_string(),
            ])
            .stdout(StdoutMode::Forward);

        info!(installer = %script.display(), version, "running installer");
        let output = ProcessRunner::new(platform).run(&command).await.map_err(|e| {
            XeolError::install_with_context(
                format!("Failed to run the {} installer: {}", name, e.message()),
                script.display().to_string(),
            )
        })?;
        if output.exit_code != 0 {
            return Err(XeolError::install_with_context(
                format!(
                    "The {} installer exited with code {}",
                    name, output.exit_code
                ),
                command.command_line(),
            ));
        }

        let binary = install_dir.join(name);
        if !fs::try_exists(&binary).await.unwrap_or(false) {
            return Err(XeolError::install_with_context(
                format!("The installer did not produce {}", binary.display()),
                install_dir.display().to_string(),
            ));
        }

        let cached = self.cache.cache_file(&binary, name, name, version).await?;
        debug!(path = %cached.display(), "installed");
        Ok(cached)
    }
}

/// Directory the installer writes into: `<script>_xeol`
fn install_dir(script: &Path) -> PathBuf {
    let mut dir: OsString = script.as_os_str().to_owned();
    dir.push("_xeol");
    PathBuf::from(dir)
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> XeolResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| {
            XeolError::install_with_context(
                format!("Failed to make the installer executable: {}", e),
                path.display().to_string(),
            )
        })
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> XeolResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_dir_suffix() {
        assert_eq!(
            install_dir(Path::new("/runner/_temp/0b5c")),
            PathBuf::from("/runner/_temp/0b5c_xeol")
        );
    }
}
