//! Runner environment
//!
//! Settings the CI runner provides to every step: debug mode, scratch and
//! tool-cache directories, and the files used for outputs and path additions.

use std::env;
use std::path::PathBuf;

/// Directories and files supplied by the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerEnvironment {
    /// `RUNNER_DEBUG=1`
    pub debug: bool,
    /// Scratch directory for downloads
    pub temp_dir: PathBuf,
    /// Root of the tool cache
    pub tool_cache_dir: PathBuf,
    /// `GITHUB_OUTPUT` file, if the runner uses file commands
    pub output_file: Option<PathBuf>,
    /// `GITHUB_PATH` file, if the runner uses file commands
    pub path_file: Option<PathBuf>,
}

impl RunnerEnvironment {
    /// Load the runner environment from the process environment
    pub fn load_from_env() -> Self {
        Self::load_from_lookup(|key| env::var(key).ok())
    }

    /// Load the runner environment through an arbitrary variable lookup
    pub fn load_from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            debug: var("RUNNER_DEBUG").as_deref() == Some("1"),
            temp_dir: var("RUNNER_TEMP")
                .map(PathBuf::from)
                .unwrap_or_else(|| fallback_dir("temp")),
            tool_cache_dir: var("RUNNER_TOOL_CACHE")
                .map(PathBuf::from)
                .unwrap_or_else(|| fallback_dir("tool-cache")),
            output_file: var("GITHUB_OUTPUT").map(PathBuf::from),
            path_file: var("GITHUB_PATH").map(PathBuf::from),
        }
    }
}

/// Per-user cache directory used outside a runner
fn fallback_dir(name: &str) -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("xeol-action")
        .join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_values() {
        let env = RunnerEnvironment::load_from_lookup(|key| match key {
            "RUNNER_DEBUG" => Some("1".to_string()),
            "RUNNER_TEMP" => Some("/runner/_temp".to_string()),
            "RUNNER_TOOL_CACHE" => Some("/opt/hostedtoolcache".to_string()),
            "GITHUB_OUTPUT" => Some("/runner/_temp/output".to_string()),
            "GITHUB_PATH" => Some("/runner/_temp/path".to_string()),
            _ => None,
        });
        assert!(env.debug);
        assert_eq!(env.temp_dir, PathBuf::from("/runner/_temp"));
        assert_eq!(env.tool_cache_dir, PathBuf::from("/opt/hostedtoolcache"));
        assert_eq!(env.output_file, Some(PathBuf::from("/runner/_temp/output")));
        assert_eq!(env.path_file, Some(PathBuf::from("/runner/_temp/path")));
    }

    #[test]
    fn test_fallbacks_outside_runner() {
        let env = RunnerEnvironment::load_from_lookup(|_| None);
        assert!(!env.debug);
        assert!(env.temp_dir.ends_with("xeol-action/temp"));
        assert!(env.tool_cache_dir.ends_with("xeol-action/tool-cache"));
        assert_eq!(env.output_file, None);
        assert_eq!(env.path_file, None);
    }

    #[test]
    fn test_debug_requires_exact_one() {
        let env = RunnerEnvironment::load_from_lookup(|key| {
            (key == "RUNNER_DEBUG").then(|| "true".to_string())
        });
        assert!(!env.debug);
    }
}
