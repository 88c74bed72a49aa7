//! Subcommand builder error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum OpsError {
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    #[error("missing required option: {option}")]
    MissingOption { option: String },
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidOptions { .. } => "ops.invalid_options",
            Self::MissingOption { .. } => "ops.missing_option",
        })
    }
}
