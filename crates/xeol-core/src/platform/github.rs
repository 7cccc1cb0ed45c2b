//! GitHub Actions implementation of the platform
//!
//! Log lines and annotations are workflow commands on stdout. Outputs and path
//! additions use the `GITHUB_OUTPUT` / `GITHUB_PATH` files when the runner
//! provides them and fall back to the legacy stdout commands otherwise.

use std::env;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::commands::format_command;
use super::search_path::SearchPath;
use super::ActionPlatform;
use crate::config::RunnerEnvironment;
use crate::error::{XeolError, XeolResult};

/// Platform backed by GitHub Actions workflow commands
pub struct GithubPlatform {
    debug: bool,
    output_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
    writer: Mutex<Box<dyn Write + Send>>,
    failed: AtomicBool,
    search_path: SearchPath,
}

impl GithubPlatform {
    /// Create a platform writing workflow commands to stdout
    pub fn new(runner: &RunnerEnvironment) -> Self {
        Self {
            debug: runner.debug,
            output_file: runner.output_file.clone(),
            path_file: runner.path_file.clone(),
            writer: Mutex::new(Box::new(io::stdout())),
            failed: AtomicBool::new(false),
            search_path: SearchPath::new(),
        }
    }

    /// Redirect workflow commands to another writer
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "failed to write workflow command");
        }
    }

    fn issue(&self, command: &str, properties: &[(&str, &str)], message: &str) {
        self.write_line(&format_command(command, properties, message));
    }

    fn append_file_command(file: &Path, contents: &str) -> XeolResult<()> {
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .map_err(|e| XeolError::io(file, e))?;
        handle
            .write_all(contents.as_bytes())
            .map_err(|e| XeolError::io(file, e))
    }
}

impl ActionPlatform for GithubPlatform {
    fn is_debug(&self) -> bool {
        self.debug
    }

    fn info(&self, message: &str) {
        self.write_line(message);
    }

    fn debug(&self, message: &str) {
        self.issue("debug", &[], message);
    }

    fn warning(&self, message: &str) {
        self.issue("warning", &[], message);
    }

    fn error(&self, message: &str) {
        self.issue("error", &[], message);
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.error(message);
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn set_output(&self, name: &str, value: &str) -> XeolResult<()> {
        match &self.output_file {
            Some(file) => {
                let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
                if name.contains(&delimiter) || value.contains(&delimiter) {
                    return Err(XeolError::config(format!(
                        "Output {} must not contain the delimiter {}",
                        name, delimiter
                    )));
                }
                Self::append_file_command(
                    file,
                    &format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter),
                )
            }
            None => {
                self.issue("set-output", &[("name", name)], value);
                Ok(())
            }
        }
    }

    fn set_secret(&self, secret: &str) {
        self.issue("add-mask", &[], secret);
    }

    fn add_path(&self, dir: &Path) -> XeolResult<()> {
        if !self.search_path.prepend(dir)? {
            return Ok(());
        }

        match &self.path_file {
            Some(file) => Self::append_file_command(file, &format!("{}\n", dir.display())),
            None => {
                self.issue("add-path", &[], &dir.display().to_string());
                Ok(())
            }
        }
    }

    fn search_path(&self) -> Option<OsString> {
        self.search_path.join_with(env::var_os("PATH"))
    }

    fn start_group(&self, name: &str) {
        self.issue("group", &[], name);
    }

    fn end_group(&self) {
        self.issue("endgroup", &[], "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Writer sharing its buffer with the test
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn runner(output_file: Option<PathBuf>, path_file: Option<PathBuf>) -> RunnerEnvironment {
        RunnerEnvironment {
            debug: false,
            temp_dir: env::temp_dir(),
            tool_cache_dir: env::temp_dir(),
            output_file,
            path_file,
        }
    }

    fn platform(runner: &RunnerEnvironment) -> (GithubPlatform, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let platform = GithubPlatform::new(runner).with_writer(buffer.clone());
        (platform, buffer)
    }

    #[test]
    fn test_log_commands() {
        let (platform, buffer) = platform(&runner(None, None));
        platform.info("plain line");
        platform.debug("debug line");
        platform.warning("multi\nline");
        platform.start_group("xeol output...");
        platform.end_group();

        assert_eq!(
            buffer.contents(),
            "plain line\n::debug::debug line\n::warning::multi%0Aline\n::group::xeol output...\n::endgroup::\n"
        );
    }

    #[test]
    fn test_set_failed_marks_run() {
        let (platform, buffer) = platform(&runner(None, None));
        assert!(!platform.has_failed());
        platform.set_failed("boom");
        assert!(platform.has_failed());
        assert_eq!(buffer.contents(), "::error::boom\n");
    }

    #[test]
    fn test_legacy_set_output() {
        let (platform, buffer) = platform(&runner(None, None));
        platform.set_output("report", "./results.json").unwrap();
        assert_eq!(
            buffer.contents(),
            "::set-output name=report::./results.json\n"
        );
    }

    #[test]
    fn test_file_set_output() {
        let temp = TempDir::new().unwrap();
        let output_file = temp.path().join("output");
        let (platform, buffer) = platform(&runner(Some(output_file.clone()), None));

        platform.set_output("cmd", "/opt/xeol/xeol").unwrap();

        assert!(buffer.contents().is_empty());
        let written = std::fs::read_to_string(&output_file).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("cmd<<ghadelimiter_"));
        assert_eq!(lines[1], "/opt/xeol/xeol");
        assert_eq!(lines[0].trim_start_matches("cmd<<"), lines[2]);
    }

    #[test]
    fn test_add_path_writes_once() {
        let temp = TempDir::new().unwrap();
        let path_file = temp.path().join("path");
        let (platform, _) = platform(&runner(None, Some(path_file.clone())));

        platform.add_path(Path::new("/opt/xeol")).unwrap();
        platform.add_path(Path::new("/opt/xeol")).unwrap();

        assert_eq!(std::fs::read_to_string(&path_file).unwrap(), "/opt/xeol\n");
        let search_path = platform.search_path().unwrap();
        assert_eq!(
            env::split_paths(&search_path).next(),
            Some(PathBuf::from("/opt/xeol"))
        );
    }

    #[test]
    fn test_legacy_add_path_and_mask() {
        let (platform, buffer) = platform(&runner(None, None));
        platform.add_path(Path::new("/opt/xeol")).unwrap();
        platform.set_secret("hunter2");
        assert_eq!(
            buffer.contents(),
            "::add-path::/opt/xeol\n::add-mask::hunter2\n"
        );
    }
}
