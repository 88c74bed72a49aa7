//! CLI error handling

use std::fmt;

use gsoc2_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Bridge operation failed
    Ops(gsoc2_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
}

impl CliError {
    /// Process exit code for this error; a failed child's own status is
    /// passed through
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Ops(e) => e.exit_code().unwrap_or(1),
            CliError::InvalidArguments(_) => 2,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<gsoc2_errors::Error> for CliError {
    fn from(e: gsoc2_errors::Error) -> Self {
        CliError::Ops(e)
    }
}
