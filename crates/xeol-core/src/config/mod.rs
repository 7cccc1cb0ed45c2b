//! Configuration for a run
//!
//! Inputs are read once at startup (runner environment first, then CLI
//! overrides) and validated into an immutable [`ScanConfig`].

pub mod defaults;
mod inputs;
mod runner;
mod scan;

pub use inputs::{ActionInputs, RunMode, input_env_name};
pub use runner::RunnerEnvironment;
pub use scan::{OutputFormat, ScanConfig};
