//! Action entrypoints
//!
//! [`ScanAction`] wires the pieces together for one run: validate inputs,
//! make sure xeol is installed, run it, and report. Every error ends up as a
//! failed run on the platform rather than propagating to the caller.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::command::CommandBuilder;
use crate::config::defaults::{REGISTRY_CREDENTIALS_WARNING, XEOL_BINARY};
use crate::config::{ActionInputs, RunMode, RunnerEnvironment, ScanConfig};
use crate::error::{XeolError, XeolResult};
use crate::executor::ScanExecutor;
use crate::platform::ActionPlatform;
use crate::reporter::{ActionOutputs, Report, ResultReporter};
use crate::tool_cache::{DirToolCache, HttpDownloader, ToolReference, ToolResolver};

/// One run of the action against a platform
pub struct ScanAction {
    platform: Arc<dyn ActionPlatform>,
    resolver: ToolResolver,
    inputs: ActionInputs,
    reporter: ResultReporter,
}

impl ScanAction {
    pub fn new(
        platform: Arc<dyn ActionPlatform>,
        resolver: ToolResolver,
        inputs: ActionInputs,
    ) -> Self {
        Self {
            platform,
            resolver,
            inputs,
            reporter: ResultReporter::default(),
        }
    }

    /// Action backed by the runner tool cache and an HTTP installer download
    pub fn from_runner(
        runner: &RunnerEnvironment,
        platform: Arc<dyn ActionPlatform>,
        inputs: ActionInputs,
    ) -> XeolResult<Self> {
        let cache = Arc::new(DirToolCache::new(&runner.tool_cache_dir));
        let downloader = Arc::new(HttpDownloader::new(&runner.temp_dir)?);
        Ok(Self::new(
            platform,
            ToolResolver::new(cache, downloader),
            inputs,
        ))
    }

    /// Write the json report somewhere other than `./results.json`
    pub fn with_reporter(mut self, reporter: ResultReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Run whichever entrypoint the `run` input selects
    pub async fn execute(&self) {
        match self.inputs.run_mode() {
            RunMode::DownloadXeol => {
                self.download_xeol().await;
            }
            RunMode::Scan => {
                self.run().await;
            }
        }
    }

    /// Scan entrypoint
    ///
    /// Returns the report when the scan got as far as reporting. Errors are
    /// already reported through [`ActionPlatform::set_failed`].
    pub async fn run(&self) -> Option<Report> {
        self.or_fail(self.scan().await)
    }

    /// Install-only entrypoint
    pub async fn download_xeol(&self) -> Option<ToolReference> {
        self.or_fail(self.install().await)
    }

    #[instrument(skip(self))]
    async fn scan(&self) -> XeolResult<Report> {
        let platform = self.platform.as_ref();
        let target = self.inputs.scan_target()?;
        if self.inputs.registry_credentials_mismatched() {
            platform.warning(REGISTRY_CREDENTIALS_WARNING);
        }
        let config = ScanConfig::from_target(target, &self.inputs, platform.is_debug())?;
        for secret in config.secrets() {
            platform.set_secret(secret);
        }

        self.resolver
            .resolve(XEOL_BINARY, self.inputs.xeol_version(), platform)
            .await?;

        let invocation = CommandBuilder::new(platform).build(&config, XEOL_BINARY);
        let outcome = ScanExecutor::new(platform).execute(&invocation).await?;
        let report = self.reporter.report(outcome, &config, platform).await?;

        report.outputs.publish(platform)?;
        info!(verdict = ?report.verdict, "scan complete");
        Ok(report)
    }

    #[instrument(skip(self))]
    async fn install(&self) -> XeolResult<ToolReference> {
        let platform = self.platform.as_ref();
        let tool = self
            .resolver
            .resolve(XEOL_BINARY, self.inputs.xeol_version(), platform)
            .await?;
        let binary = tool.binary_path().ok_or_else(|| {
            XeolError::install(format!("No installed path for {}", tool.name))
        })?;
        let binary = binary.to_string_lossy().into_owned();

        platform.info(&format!("Downloaded Xeol to: {}", binary));
        ActionOutputs {
            report: None,
            cmd: Some(binary),
        }
        .publish(platform)?;
        Ok(tool)
    }

    fn or_fail<T>(&self, result: XeolResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                error!(code = e.error_code(), "{}", e);
                self.platform.set_failed(e.message());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingPlatform;
    use crate::source::MUTUALLY_EXCLUSIVE_MESSAGE;
    use crate::tool_cache::{Downloader, ToolCache};
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingCache {
        finds: AtomicUsize,
    }

    #[async_trait]
    impl ToolCache for CountingCache {
        async fn find(&self, _tool: &str, _version: &str) -> Option<PathBuf> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            None
        }

        async fn cache_file(
            &self,
            _source: &Path,
            _target_name: &str,
            _tool: &str,
            _version: &str,
        ) -> XeolResult<PathBuf> {
            Err(XeolError::install("not expected"))
        }
    }

    #[derive(Default)]
    struct CountingDownloader {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Downloader for CountingDownloader {
        async fn download(&self, url: &str) -> XeolResult<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(XeolError::download_status(url, 503))
        }
    }

    struct Fixture {
        platform: Arc<RecordingPlatform>,
        cache: Arc<CountingCache>,
        downloader: Arc<CountingDownloader>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                platform: Arc::new(RecordingPlatform::new()),
                cache: Arc::new(CountingCache::default()),
                downloader: Arc::new(CountingDownloader::default()),
            }
        }

        fn action(&self, inputs: ActionInputs) -> ScanAction {
            ScanAction::new(
                self.platform.clone(),
                ToolResolver::new(self.cache.clone(), self.downloader.clone()),
                inputs,
            )
        }
    }

    #[tokio::test]
    async fn test_mutually_exclusive_sources_fail_before_install() {
        let fixture = Fixture::new();
        let action = fixture.action(ActionInputs {
            image: Some("alpine:3.9".to_string()),
            path: Some("./".to_string()),
            ..Default::default()
        });

        assert!(action.run().await.is_none());
        assert_eq!(
            fixture.platform.failures(),
            vec![MUTUALLY_EXCLUSIVE_MESSAGE.to_string()]
        );
        assert_eq!(fixture.cache.finds.load(Ordering::SeqCst), 0);
        assert_eq!(fixture.downloader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_format_fails_before_install() {
        let fixture = Fixture::new();
        let action = fixture.action(ActionInputs {
            output_format: Some("xml".to_string()),
            ..Default::default()
        });

        assert!(action.run().await.is_none());
        let failures = fixture.platform.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("xml"));
        assert_eq!(fixture.cache.finds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_registry_credential_warns_before_format_check() {
        let fixture = Fixture::new();
        let action = fixture.action(ActionInputs {
            output_format: Some("xml".to_string()),
            registry_username: Some("user".to_string()),
            ..Default::default()
        });

        assert!(action.run().await.is_none());
        assert_eq!(
            fixture.platform.warnings(),
            vec![REGISTRY_CREDENTIALS_WARNING.to_string()]
        );
        assert!(fixture.platform.failures()[0].contains("xml"));
        assert_eq!(fixture.cache.finds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_conflicting_sources_do_not_warn_about_credentials() {
        let fixture = Fixture::new();
        let action = fixture.action(ActionInputs {
            image: Some("alpine:3.9".to_string()),
            sbom: Some("bom.json".to_string()),
            registry_password: Some("hunter2".to_string()),
            ..Default::default()
        });

        assert!(action.run().await.is_none());
        assert!(fixture.platform.warnings().is_empty());
        assert_eq!(
            fixture.platform.failures(),
            vec![MUTUALLY_EXCLUSIVE_MESSAGE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_download_failure_fails_run() {
        let fixture = Fixture::new();
        let action = fixture.action(ActionInputs::default());

        assert!(action.run().await.is_none());
        assert_eq!(fixture.downloader.calls.load(Ordering::SeqCst), 1);
        assert!(fixture.platform.failures()[0].contains("503"));
    }

    #[tokio::test]
    async fn test_secrets_masked_before_install() {
        let fixture = Fixture::new();
        let action = fixture.action(ActionInputs {
            api_key: Some("k3y".to_string()),
            registry_password: Some("hunter2".to_string()),
            ..Default::default()
        });

        action.run().await;
        assert_eq!(
            fixture.platform.secrets(),
            vec!["k3y".to_string(), "hunter2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_download_xeol_failure_sets_failed() {
        let fixture = Fixture::new();
        let action = fixture.action(ActionInputs {
            run: Some("download-xeol".to_string()),
            ..Default::default()
        });

        action.execute().await;
        assert!(fixture.platform.has_failed());
        assert_eq!(fixture.platform.output("cmd"), None);
    }
}
