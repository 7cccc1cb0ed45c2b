//! Action inputs
//!
//! Inputs are the named parameters of the action. The runner exposes each one
//! as an `INPUT_<NAME>` environment variable; the CLI may override any of them.

use std::env;

use super::defaults::{
    DEFAULT_FAIL_BUILD, DEFAULT_OUTPUT_FORMAT, DEFAULT_XEOL_VERSION, DOWNLOAD_XEOL_ENTRYPOINT,
};
use crate::error::XeolResult;
use crate::source::{ScanTarget, select_target};

/// Which entrypoint the action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Install xeol, scan the target and report
    Scan,
    /// Only install xeol and publish its path as the `cmd` output
    DownloadXeol,
}

impl RunMode {
    /// Resolve the `run` input. Anything but `download-xeol` runs the scan.
    pub fn from_input(value: Option<&str>) -> Self {
        match value {
            Some(DOWNLOAD_XEOL_ENTRYPOINT) => Self::DownloadXeol,
            _ => Self::Scan,
        }
    }
}

/// Raw action inputs. `None` means the input was absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInputs {
    pub xeol_version: Option<String>,
    pub image: Option<String>,
    pub path: Option<String>,
    pub sbom: Option<String>,
    pub fail_build: Option<String>,
    pub api_key: Option<String>,
    pub output_format: Option<String>,
    pub registry_username: Option<String>,
    pub registry_password: Option<String>,
    pub run: Option<String>,
}

/// Environment variable carrying an input, e.g. `fail-build` -> `INPUT_FAIL-BUILD`
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ActionInputs {
    /// Load inputs from the process environment
    pub fn load_from_env() -> Self {
        Self::load_from_lookup(|key| env::var(key).ok())
    }

    /// Load inputs through an arbitrary variable lookup
    pub fn load_from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = |name: &str| non_blank(lookup(&input_env_name(name)));

        Self {
            xeol_version: input("xeol-version"),
            image: input("image"),
            path: input("path"),
            sbom: input("sbom"),
            fail_build: input("fail-build"),
            api_key: input("api-key"),
            output_format: input("output-format"),
            registry_username: input("registry-username"),
            registry_password: input("registry-password"),
            run: input("run"),
        }
    }

    /// Merge overrides into these inputs. Non-blank values in `other` win.
    pub fn merge(&mut self, other: ActionInputs) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if let Some(value) = non_blank(value) {
                *slot = Some(value);
            }
        }

        take(&mut self.xeol_version, other.xeol_version);
        take(&mut self.image, other.image);
        take(&mut self.path, other.path);
        take(&mut self.sbom, other.sbom);
        take(&mut self.fail_build, other.fail_build);
        take(&mut self.api_key, other.api_key);
        take(&mut self.output_format, other.output_format);
        take(&mut self.registry_username, other.registry_username);
        take(&mut self.registry_password, other.registry_password);
        take(&mut self.run, other.run);
    }

    /// Requested xeol version, or the pinned default
    pub fn xeol_version(&self) -> &str {
        self.xeol_version.as_deref().unwrap_or(DEFAULT_XEOL_VERSION)
    }

    /// `fail-build` is true only for a case-insensitive `"true"`
    pub fn fail_build(&self) -> bool {
        self.fail_build
            .as_deref()
            .unwrap_or(DEFAULT_FAIL_BUILD)
            .eq_ignore_ascii_case("true")
    }

    /// Requested output format, unvalidated
    pub fn output_format(&self) -> &str {
        self.output_format.as_deref().unwrap_or(DEFAULT_OUTPUT_FORMAT)
    }

    pub fn run_mode(&self) -> RunMode {
        RunMode::from_input(self.run.as_deref())
    }

    /// The single scan target named by `image`, `path` or `sbom`
    pub fn scan_target(&self) -> XeolResult<ScanTarget> {
        select_target(
            self.image.as_deref(),
            self.path.as_deref(),
            self.sbom.as_deref(),
        )
    }

    /// True when exactly one of the paired registry credentials was supplied
    pub fn registry_credentials_mismatched(&self) -> bool {
        self.registry_username.is_some() != self.registry_password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_input_env_name() {
        assert_eq!(input_env_name("image"), "INPUT_IMAGE");
        assert_eq!(input_env_name("fail-build"), "INPUT_FAIL-BUILD");
        assert_eq!(input_env_name("some input"), "INPUT_SOME_INPUT");
    }

    #[test]
    fn test_defaults_when_absent() {
        let inputs = ActionInputs::load_from_lookup(lookup(&[]));
        assert_eq!(inputs, ActionInputs::default());
        assert_eq!(inputs.xeol_version(), DEFAULT_XEOL_VERSION);
        assert_eq!(inputs.output_format(), "table");
        assert!(inputs.fail_build());
        assert_eq!(inputs.run_mode(), RunMode::Scan);
    }

    #[test]
    fn test_blank_inputs_are_absent() {
        let inputs = ActionInputs::load_from_lookup(lookup(&[
            ("INPUT_IMAGE", ""),
            ("INPUT_PATH", "   "),
            ("INPUT_SBOM", " sbom.json "),
        ]));
        assert_eq!(inputs.image, None);
        assert_eq!(inputs.path, None);
        assert_eq!(inputs.sbom.as_deref(), Some("sbom.json"));
    }

    #[test]
    fn test_load_all_inputs() {
        let inputs = ActionInputs::load_from_lookup(lookup(&[
            ("INPUT_XEOL-VERSION", "v0.9.0"),
            ("INPUT_FAIL-BUILD", "FALSE"),
            ("INPUT_API-KEY", "secret"),
            ("INPUT_OUTPUT-FORMAT", "json"),
            ("INPUT_REGISTRY-USERNAME", "user"),
            ("INPUT_REGISTRY-PASSWORD", "pass"),
            ("INPUT_RUN", "download-xeol"),
        ]));
        assert_eq!(inputs.xeol_version(), "v0.9.0");
        assert!(!inputs.fail_build());
        assert_eq!(inputs.api_key.as_deref(), Some("secret"));
        assert_eq!(inputs.output_format(), "json");
        assert_eq!(inputs.registry_username.as_deref(), Some("user"));
        assert_eq!(inputs.registry_password.as_deref(), Some("pass"));
        assert_eq!(inputs.run_mode(), RunMode::DownloadXeol);
    }

    #[test]
    fn test_fail_build_parsing() {
        let with = |value: &str| ActionInputs {
            fail_build: Some(value.to_string()),
            ..Default::default()
        };
        assert!(with("true").fail_build());
        assert!(with("TRUE").fail_build());
        assert!(with("True").fail_build());
        assert!(!with("false").fail_build());
        assert!(!with("yes").fail_build());
        assert!(!with("1").fail_build());
    }

    #[test]
    fn test_unknown_run_mode_scans() {
        assert_eq!(RunMode::from_input(Some("scan")), RunMode::Scan);
        assert_eq!(RunMode::from_input(Some("Download-Xeol")), RunMode::Scan);
        assert_eq!(RunMode::from_input(None), RunMode::Scan);
    }

    #[test]
    fn test_merge_overrides_non_blank() {
        let mut inputs = ActionInputs {
            image: Some("alpine:3.12".to_string()),
            output_format: Some("json".to_string()),
            ..Default::default()
        };
        inputs.merge(ActionInputs {
            image: Some("debian:9".to_string()),
            output_format: Some(String::new()),
            api_key: Some("key".to_string()),
            ..Default::default()
        });
        assert_eq!(inputs.image.as_deref(), Some("debian:9"));
        assert_eq!(inputs.output_format.as_deref(), Some("json"));
        assert_eq!(inputs.api_key.as_deref(), Some("key"));
        assert_eq!(inputs.sbom, None);
    }
}
