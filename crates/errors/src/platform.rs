//! Binary resolution errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Human readable list of the platforms a native binary is published for.
pub const SUPPORTED_PLATFORMS: &str = "\
- Darwin (macOS)
- Linux and FreeBSD on x64, x86, ia32, arm64, and arm architectures
- Windows x64, x86, and ia32 architectures";

/// Why the companion package lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryNotFoundReason {
    /// A package for some other platform/architecture is installed instead.
    WrongPlatformPackage,
    /// No companion package is installed at all.
    OptionalDependenciesMissing,
}

/// Errors that can occur while locating the native binary
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error(
        "Unsupported operating system or architecture ({os}/{arch})! gsoc2-cli does not work on this architecture.\n\ngsoc2-cli supports:\n{}",
        SUPPORTED_PLATFORMS
    )]
    UnsupportedPlatform { os: String, arch: String },

    #[error("{}", binary_not_found_message(.reason, .expected, .installed))]
    BinaryNotFound {
        reason: BinaryNotFoundReason,
        /// Package that should have been installed for this host.
        expected: String,
        /// Package found instead, for [`BinaryNotFoundReason::WrongPlatformPackage`].
        installed: Option<String>,
    },
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn binary_not_found_message(
    reason: &BinaryNotFoundReason,
    expected: &str,
    installed: &Option<String>,
) -> String {
    let detail = match (reason, installed) {
        (BinaryNotFoundReason::WrongPlatformPackage, Some(installed)) => format!(
            "The \"{installed}\" package is installed, but for the current platform, you should have the \"{expected}\" package installed. \
gsoc2-cli supports installing and running on multiple platforms and architectures. However, the \"node_modules\" folder may have been copied from another platform or architecture. \
Please remove your \"node_modules\" folder and reinstall your dependencies."
        ),
        _ => "It seems like none of the \"@gsoc2/cli\" package's optional dependencies got installed. \
Please make sure your package manager is configured to install optional dependencies. \
If you are using npm to install your dependencies, please don't set the \"--no-optional\", \"--ignore-optional\", or \"--omit=optional\" flags. \
gsoc2-cli needs the \"optionalDependencies\" feature in order to install its binary."
            .to_string(),
    };
    format!("gsoc2-cli binary for this platform/architecture not found!\n\n{detail}")
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedPlatform { .. } => {
                Some("Point GSOC2_BINARY_PATH at a gsoc2-cli binary built for this machine.")
            }
            Self::BinaryNotFound {
                reason: BinaryNotFoundReason::WrongPlatformPackage,
                ..
            } => Some("Remove node_modules and reinstall dependencies on this machine."),
            Self::BinaryNotFound {
                reason: BinaryNotFoundReason::OptionalDependenciesMissing,
                ..
            } => Some("Enable optional dependencies in your package manager and reinstall."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::UnsupportedPlatform { .. } => "platform.unsupported",
            Self::BinaryNotFound {
                reason: BinaryNotFoundReason::WrongPlatformPackage,
                ..
            } => "platform.wrong_package",
            Self::BinaryNotFound {
                reason: BinaryNotFoundReason::OptionalDependenciesMissing,
                ..
            } => "platform.optional_dependencies_missing",
        })
    }
}
