#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the gsoc2 command bridge
//!
//! This crate provides fine-grained error types organized by domain.
//! Every domain error is `Clone` and rolls up into [`Error`], whose
//! [`Error::kind`] exposes the closed taxonomy callers branch on.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod ops;
pub mod platform;
pub mod process;
pub mod schema;

// Re-export all error types at the root
pub use config::ConfigError;
pub use ops::OpsError;
pub use platform::{BinaryNotFoundReason, PlatformError};
pub use process::ProcessError;
pub use schema::SchemaError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("process error: {0}")]
    Process(#[from] ProcessError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("ops error: {0}")]
    Ops(#[from] OpsError),
}

/// Closed classification of every failure the bridge can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedPlatform,
    BinaryNotFound(BinaryNotFoundReason),
    SchemaValidation,
    ProcessFailure,
    Config,
    InvalidOptions,
}

impl Error {
    /// Classify this error into the closed [`ErrorKind`] taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Platform(PlatformError::UnsupportedPlatform { .. }) => {
                ErrorKind::UnsupportedPlatform
            }
            Error::Platform(PlatformError::BinaryNotFound { reason, .. }) => {
                ErrorKind::BinaryNotFound(*reason)
            }
            Error::Schema(_) => ErrorKind::SchemaValidation,
            Error::Process(_) => ErrorKind::ProcessFailure,
            Error::Config(_) => ErrorKind::Config,
            Error::Ops(_) => ErrorKind::InvalidOptions,
        }
    }

    /// Exit status of the failed child process, when there was one.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Process(err) => err.exit_code(),
            _ => None,
        }
    }
}

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Platform(err) => err.user_message(),
            Error::Schema(err) => err.user_message(),
            Error::Process(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Ops(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Platform(err) => err.user_hint(),
            Error::Schema(err) => err.user_hint(),
            Error::Process(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Ops(err) => err.user_hint(),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Platform(err) => err.user_code(),
            Error::Schema(err) => err.user_code(),
            Error::Process(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Ops(err) => err.user_code(),
        }
    }
}
