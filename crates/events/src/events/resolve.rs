use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Which resolution step produced the binary path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// `GSOC2_BINARY_PATH`
    EnvOverride,
    /// Test substitution configured on the resolver
    Mock,
    /// Binary shipped next to the bridge's own install root
    Fallback,
    /// Platform-specific companion package
    CompanionPackage,
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::EnvOverride => "env_override",
            Self::Mock => "mock",
            Self::Fallback => "fallback",
            Self::CompanionPackage => "companion_package",
        })
    }
}

/// Binary path resolution events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolveEvent {
    Resolved {
        path: PathBuf,
        source: ResolutionSource,
    },

    Failed {
        os: String,
        arch: String,
        failure: FailureContext,
    },
}
