//! Error types for xeol-action
//!
//! Every fallible operation in the crate returns [`XeolResult`]. Errors carry
//! a stable error code for programmatic matching and a bare message that the
//! action surfaces verbatim as the run's failure reason.

mod constructors;
mod types;
mod unified_error;

pub use types::{XeolError, XeolResult};
