#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the gsoc2 command bridge
//!
//! This crate provides the data model shared by the serializer, the
//! executor and the subcommand builders: option schemas, option values and
//! execution modes.

pub mod exec;
pub mod options;

// Re-export commonly used types
pub use exec::ExecMode;
pub use options::{OptionSchema, OptionSpec, OptionType, OptionValue, OptionValues};
