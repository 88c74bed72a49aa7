use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Child process lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessEvent {
    /// Process spawned
    Started {
        program: String,
        args: Vec<String>,
        /// `buffered` or `live`
        mode: String,
    },

    /// Process exited. Live runs report here even on a nonzero status.
    Completed {
        program: String,
        exit_code: Option<i32>,
        duration_ms: u64,
        /// Captured stdout size, buffered mode only
        stdout_bytes: Option<u64>,
    },

    /// Spawn failure, or nonzero exit of a buffered run
    Failed {
        program: String,
        failure: FailureContext,
        duration_ms: u64,
    },
}
