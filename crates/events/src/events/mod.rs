use serde::{Deserialize, Serialize};

use crate::EventSource;
use gsoc2_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
        )
    }
}

pub mod process;
pub mod resolve;

pub use process::*;
pub use resolve::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Native binary path resolution
    Resolve(ResolveEvent),

    /// Child process lifecycle
    Process(ProcessEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::Resolve(_) => EventSource::RESOLVER,
            Self::Process(_) => EventSource::PROCESS,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Resolve(ResolveEvent::Failed { .. })
            | Self::Process(ProcessEvent::Failed { .. }) => Level::ERROR,

            Self::Process(ProcessEvent::Completed { exit_code, .. }) if *exit_code != Some(0) => {
                Level::WARN
            }

            Self::Resolve(_) => Level::DEBUG,

            _ => Level::INFO,
        }
    }
}
