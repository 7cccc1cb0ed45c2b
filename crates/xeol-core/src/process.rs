//! Child process execution
//!
//! Runs a program with an explicit environment, forwards its stderr to the
//! platform log line by line as it arrives, and either captures stdout
//! silently or forwards it like stderr.

use std::collections::HashMap;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;

use crate::error::{XeolError, XeolResult};
use crate::platform::ActionPlatform;

/// What happens to the child's stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutMode {
    /// Keep stdout in memory only; nothing reaches the log live
    Capture,
    /// Log each stdout line as it arrives (it is also kept in memory)
    Forward,
}

/// A program to run
#[derive(Debug, Clone)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Full environment of the child. `None` inherits the parent's.
    pub env: Option<HashMap<String, String>>,
    pub stdout: StdoutMode,
}

impl ProcessCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: None,
            stdout: StdoutMode::Forward,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn stdout(mut self, mode: StdoutMode) -> Self {
        self.stdout = mode;
        self
    }

    /// `program arg1 arg2 ...`
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
}

/// Runs processes, reporting through the platform log
pub struct ProcessRunner<'a> {
    platform: &'a dyn ActionPlatform,
}

impl<'a> ProcessRunner<'a> {
    pub fn new(platform: &'a dyn ActionPlatform) -> Self {
        Self { platform }
    }

    /// Run to completion. A non-zero exit is returned as data, not as an error.
    pub async fn run(&self, cmd: &ProcessCommand) -> XeolResult<ProcessOutput> {
        let mut command = Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(env) = &cmd.env {
            command.env_clear().envs(env);
        }

        self.platform.debug(&format!("exec: {}", cmd.command_line()));
        let mut child = command.spawn().map_err(|e| {
            XeolError::execution(&cmd.program, format!("Failed to start process: {}", e))
        })?;
        self.platform
            .debug(&format!("{} started with pid {:?}", cmd.program, child.id()));

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let stdout = async move {
            match stdout_pipe {
                Some(pipe) => match cmd.stdout {
                    StdoutMode::Capture => capture(pipe).await,
                    StdoutMode::Forward => self.forward_lines(pipe).await,
                },
                None => Ok(Vec::new()),
            }
        };
        let stderr = async move {
            match stderr_pipe {
                Some(pipe) => self.forward_lines(pipe).await.map(|_| ()),
                None => Ok(()),
            }
        };

        let (stdout, stderr, status) = tokio::join!(stdout, stderr, child.wait());

        let status = status.map_err(|e| {
            XeolError::execution(&cmd.program, format!("Failed to wait for process: {}", e))
        })?;
        let stdout = stdout.map_err(|e| {
            XeolError::execution(&cmd.program, format!("Failed to read stdout: {}", e))
        })?;
        if let Err(e) = stderr {
            tracing::warn!(program = %cmd.program, error = %e, "stderr stream ended early");
        }

        let exit_code = exit_code(status);
        self.platform
            .debug(&format!("{} exited with code {}", cmd.program, exit_code));

        Ok(ProcessOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
        })
    }

    /// Log each line to the info channel, returning everything read
    async fn forward_lines<R: AsyncRead + Unpin>(&self, pipe: R) -> std::io::Result<Vec<u8>> {
        let mut reader = BufReader::new(pipe);
        let mut all = Vec::new();
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            all.extend_from_slice(&line);
            let text = String::from_utf8_lossy(&line);
            self.platform.info(text.trim_end_matches(['\n', '\r']));
        }

        Ok(all)
    }
}

/// Read stdout fully into memory. The live copy goes to a discarding sink
/// that only exists for this one execution.
async fn capture<R: AsyncRead + Unpin>(mut pipe: R) -> std::io::Result<Vec<u8>> {
    let mut passthrough = tokio::io::sink();
    let mut captured = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        let n = pipe.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        captured.extend_from_slice(&chunk[..n]);
        passthrough.write_all(&chunk[..n]).await?;
    }

    Ok(captured)
}

/// Exit code of a finished process. Signal deaths map to `128 + signal`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
