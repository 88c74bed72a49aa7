#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Invocation of the native `gsoc2-cli` binary
//!
//! The [`Executor`] resolves the binary through a
//! [`gsoc2_platform::PlatformResolver`], layers the configuration onto a copy
//! of the current environment and runs exactly one child process per call.
//!
//! Two modes are supported:
//! - buffered: stdout is captured and returned, a nonzero exit is an error
//! - live: output goes to the terminal (or nowhere when silent) and the call
//!   succeeds once the child exits, whatever its status
//!
//! Spawning goes through the [`ProcessRunner`] trait so callers can swap the
//! tokio-backed runner for their own.

pub mod executor;
pub mod implementations;
pub mod process;

pub use executor::{ExecOutput, ExecutionRequest, Executor};
pub use implementations::tokio_runner::TokioProcessRunner;
pub use process::{CommandOutput, PreparedCommand, ProcessRunner};
