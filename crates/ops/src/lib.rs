#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations on top of the gsoc2 command bridge
//!
//! [`Gsoc2Cli`] carries the configuration shared by every invocation and
//! exposes the generic `execute` entry point. [`Releases`] builds the argument
//! lists for release management, validating free-form options against the
//! schemas in [`schemas`].

mod client;
mod options;
mod releases;
pub mod schemas;

pub use client::Gsoc2Cli;
pub use options::{ReleaseOptions, SetCommitsOptions, SourceMapInclude, UploadSourceMapsOptions};
pub use releases::Releases;

pub use gsoc2_exec::ExecOutput;
