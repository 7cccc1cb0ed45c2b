//! Platform that records every call, for tests and dry runs

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::search_path::SearchPath;
use super::ActionPlatform;
use crate::error::XeolResult;

/// A single call made against the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    Info(String),
    Debug(String),
    Warning(String),
    Error(String),
    Failed(String),
    Output { name: String, value: String },
    Secret(String),
    PathAdded(PathBuf),
    GroupStarted(String),
    GroupEnded,
}

/// Records platform calls in order
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    debug: bool,
    events: Mutex<Vec<PlatformEvent>>,
    search_path: SearchPath,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the runner is in debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn events(&self) -> Vec<PlatformEvent> {
        self.events.lock().clone()
    }

    fn record(&self, event: PlatformEvent) {
        self.events.lock().push(event);
    }

    fn collect<F>(&self, f: F) -> Vec<String>
    where
        F: Fn(&PlatformEvent) -> Option<&String>,
    {
        self.events.lock().iter().filter_map(|e| f(e).cloned()).collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.collect(|e| match e {
            PlatformEvent::Info(m) => Some(m),
            _ => None,
        })
    }

    pub fn debugs(&self) -> Vec<String> {
        self.collect(|e| match e {
            PlatformEvent::Debug(m) => Some(m),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.collect(|e| match e {
            PlatformEvent::Warning(m) => Some(m),
            _ => None,
        })
    }

    pub fn failures(&self) -> Vec<String> {
        self.collect(|e| match e {
            PlatformEvent::Failed(m) => Some(m),
            _ => None,
        })
    }

    pub fn secrets(&self) -> Vec<String> {
        self.collect(|e| match e {
            PlatformEvent::Secret(m) => Some(m),
            _ => None,
        })
    }

    /// Value of the last output published under `name`
    pub fn output(&self, name: &str) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            PlatformEvent::Output { name: n, value } if n == name => Some(value.clone()),
            _ => None,
        })
    }

    pub fn added_paths(&self) -> Vec<PathBuf> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                PlatformEvent::PathAdded(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ActionPlatform for RecordingPlatform {
    fn is_debug(&self) -> bool {
        self.debug
    }

    fn info(&self, message: &str) {
        self.record(PlatformEvent::Info(message.to_string()));
    }

    fn debug(&self, message: &str) {
        self.record(PlatformEvent::Debug(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.record(PlatformEvent::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.record(PlatformEvent::Error(message.to_string()));
    }

    fn set_failed(&self, message: &str) {
        self.record(PlatformEvent::Failed(message.to_string()));
    }

    fn has_failed(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|e| matches!(e, PlatformEvent::Failed(_)))
    }

    fn set_output(&self, name: &str, value: &str) -> XeolResult<()> {
        self.record(PlatformEvent::Output {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn set_secret(&self, secret: &str) {
        self.record(PlatformEvent::Secret(secret.to_string()));
    }

    fn add_path(&self, dir: &Path) -> XeolResult<()> {
        if self.search_path.prepend(dir)? {
            self.record(PlatformEvent::PathAdded(dir.to_path_buf()));
        }
        Ok(())
    }

    fn search_path(&self) -> Option<OsString> {
        self.search_path.join_with(env::var_os("PATH"))
    }

    fn start_group(&self, name: &str) {
        self.record(PlatformEvent::GroupStarted(name.to_string()));
    }

    fn end_group(&self) {
        self.record(PlatformEvent::GroupEnded);
    }
}
