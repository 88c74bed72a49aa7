//! Option schema validation errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Raised when an option value does not match the type its schema declares
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{option} should be an array")]
    ExpectedArray { option: String },

    #[error("{option} should be a bool")]
    ExpectedBool { option: String },

    #[error("{option} has a value but declares no flag")]
    MissingFlag { option: String },
}

impl SchemaError {
    /// Name of the offending option.
    #[must_use]
    pub fn option(&self) -> &str {
        match self {
            Self::ExpectedArray { option }
            | Self::ExpectedBool { option }
            | Self::MissingFlag { option } => option,
        }
    }
}

impl UserFacingError for SchemaError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("Pass a value of the type the option schema declares.")
    }

    fn user_code(&self) -> Option<&'static str> {
        Some("schema.validation")
    }
}
