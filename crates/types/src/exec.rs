//! Execution modes for the native binary

use serde::{Deserialize, Serialize};

/// How a child process is run and what the caller gets back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExecMode {
    /// Run to completion and capture standard output.
    #[default]
    Buffered,
    /// Stream output through the caller's terminal, or discard it when
    /// `silent` is set. Exit status is not reported.
    Live { silent: bool },
}

impl ExecMode {
    /// Build a mode from the `live`/`silent` flag pair callers pass around.
    #[must_use]
    pub fn from_flags(live: bool, silent: bool) -> Self {
        if live {
            Self::Live { silent }
        } else {
            Self::Buffered
        }
    }

    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Live { .. })
    }
}

impl std::fmt::Display for ExecMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buffered => write!(f, "buffered"),
            Self::Live { silent: false } => write!(f, "live"),
            Self::Live { silent: true } => write!(f, "live (silent)"),
        }
    }
}
