//! Child process failures

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Failures of a buffered invocation of the native binary
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    #[error("command failed: {program} exited with status {code}\n{stderr}")]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("command failed: {program} was terminated by a signal\n{stderr}")]
    Terminated { program: String, stderr: String },

    #[error("failed to spawn {program}: {message}")]
    Spawn {
        program: String,
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl ProcessError {
    /// Build a spawn failure from the OS error
    pub fn spawn(program: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Exit status of the child, when it exited normally.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl UserFacingError for ProcessError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Spawn {
                kind: std::io::ErrorKind::NotFound,
                ..
            } => Some("Check that GSOC2_BINARY_PATH points to an existing gsoc2-cli binary."),
            Self::Spawn {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            } => Some("Make the gsoc2-cli binary executable."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NonZeroExit { .. } => "process.exit_status",
            Self::Terminated { .. } => "process.terminated",
            Self::Spawn { .. } => "process.spawn",
        })
    }
}
