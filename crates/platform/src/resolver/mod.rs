//! Resolution of the native binary path

use gsoc2_config::BINARY_PATH_ENV;
use gsoc2_errors::{BinaryNotFoundReason, Error, PlatformError};
use gsoc2_events::{
    AppEvent, EventEmitter, EventSender, FailureContext, ResolutionSource, ResolveEvent,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use crate::distribution::{HostPlatform, PlatformKey, BINARY_DISTRIBUTIONS};
use crate::implementations::node_modules::NodeModulesLocator;
use crate::locator::PackageLocator;

/// Produces the path of the `gsoc2-cli` executable to run
///
/// Resolution order, first match wins:
/// 1. `GSOC2_BINARY_PATH`, used verbatim
/// 2. the mock path configured on this resolver
/// 3. `<install_root>/gsoc2-cli[.exe]`, if it exists
/// 4. the companion package for the host platform
///
/// Nothing is cached between calls apart from the mock path.
#[derive(Clone)]
pub struct PlatformResolver {
    host: HostPlatform,
    install_root: PathBuf,
    mock_binary_path: Option<PathBuf>,
    locator: Arc<dyn PackageLocator>,
    event_sender: Option<EventSender>,
}

impl std::fmt::Debug for PlatformResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformResolver")
            .field("host", &self.host)
            .field("install_root", &self.install_root)
            .field("mock_binary_path", &self.mock_binary_path)
            .finish_non_exhaustive()
    }
}

impl EventEmitter for PlatformResolver {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Default for PlatformResolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PlatformResolver {
    /// Resolver for the current host, rooted next to the running executable
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> PlatformResolverBuilder {
        PlatformResolverBuilder::default()
    }

    #[must_use]
    pub fn host(&self) -> &HostPlatform {
        &self.host
    }

    #[must_use]
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Substitute the resolved path until cleared. Meant for tests of code
    /// that drives the binary.
    pub fn set_mock_binary_path(&mut self, path: impl Into<PathBuf>) {
        self.mock_binary_path = Some(path.into());
    }

    pub fn clear_mock_binary_path(&mut self) {
        self.mock_binary_path = None;
    }

    /// Location of the binary shipped alongside the bridge itself
    #[must_use]
    pub fn fallback_binary_path(&self) -> PathBuf {
        self.install_root.join(self.host.executable_name())
    }

    /// Resolve the binary path for this call
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::UnsupportedPlatform` when the host has no
    /// published distribution, and `PlatformError::BinaryNotFound` when the
    /// companion package is not installed.
    pub async fn resolve_path(&self) -> Result<PathBuf, Error> {
        let env_override = std::env::var_os(BINARY_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        self.resolve_with_override(env_override).await
    }

    async fn resolve_with_override(&self, env_override: Option<PathBuf>) -> Result<PathBuf, Error> {
        if let Some(path) = env_override {
            return Ok(self.resolved(path, ResolutionSource::EnvOverride));
        }

        if let Some(path) = &self.mock_binary_path {
            return Ok(self.resolved(path.clone(), ResolutionSource::Mock));
        }

        let fallback = self.fallback_binary_path();
        if fs::try_exists(&fallback).await.unwrap_or(false) {
            return Ok(self.resolved(fallback, ResolutionSource::Fallback));
        }

        match self.locate_companion().await {
            Ok(path) => Ok(self.resolved(path, ResolutionSource::CompanionPackage)),
            Err(err) => {
                self.emit(AppEvent::Resolve(ResolveEvent::Failed {
                    os: self.host.os.to_string(),
                    arch: self.host.arch.to_string(),
                    failure: FailureContext::from_error(&err),
                }));
                Err(err.into())
            }
        }
    }

    async fn locate_companion(&self) -> Result<PathBuf, PlatformError> {
        let Some(key) = PlatformKey::for_host(&self.host) else {
            return Err(PlatformError::UnsupportedPlatform {
                os: self.host.os.to_string(),
                arch: self.host.arch.to_string(),
            });
        };
        let expected = key.distribution();

        if let Some(path) = self
            .locator
            .locate(expected.package_name, expected.subpath)
            .await
        {
            return Ok(path);
        }

        let mut installed = None;
        for other in BINARY_DISTRIBUTIONS.iter().filter(|d| d.platform_key != key) {
            if self
                .locator
                .locate(other.package_name, other.subpath)
                .await
                .is_some()
            {
                installed = Some(other.package_name.to_string());
                break;
            }
        }

        let reason = if installed.is_some() {
            BinaryNotFoundReason::WrongPlatformPackage
        } else {
            BinaryNotFoundReason::OptionalDependenciesMissing
        };
        Err(PlatformError::BinaryNotFound {
            reason,
            expected: expected.package_name.to_string(),
            installed,
        })
    }

    fn resolved(&self, path: PathBuf, source: ResolutionSource) -> PathBuf {
        debug!(
            path = %path.display(),
            source = %source,
            host = %self.host,
            "resolved gsoc2-cli binary"
        );
        self.emit(AppEvent::Resolve(ResolveEvent::Resolved {
            path: path.clone(),
            source,
        }));
        path
    }
}

/// Builder for [`PlatformResolver`]
#[derive(Default)]
pub struct PlatformResolverBuilder {
    host: Option<HostPlatform>,
    install_root: Option<PathBuf>,
    search_root: Option<PathBuf>,
    mock_binary_path: Option<PathBuf>,
    locator: Option<Arc<dyn PackageLocator>>,
    event_sender: Option<EventSender>,
}

impl PlatformResolverBuilder {
    /// Resolve for this host instead of the running one
    #[must_use]
    pub fn host(mut self, host: HostPlatform) -> Self {
        self.host = Some(host);
        self
    }

    /// Directory holding the fallback binary; defaults to the directory of
    /// the running executable
    #[must_use]
    pub fn install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = Some(root.into());
        self
    }

    /// Where the default locator starts looking for `node_modules`;
    /// defaults to the install root
    #[must_use]
    pub fn search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn mock_binary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mock_binary_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn locator(mut self, locator: Arc<dyn PackageLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    #[must_use]
    pub fn event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    #[must_use]
    pub fn build(self) -> PlatformResolver {
        let install_root = self.install_root.unwrap_or_else(default_install_root);
        let locator = self.locator.unwrap_or_else(|| {
            let search_root = self.search_root.unwrap_or_else(|| install_root.clone());
            Arc::new(NodeModulesLocator::new(search_root))
        });

        PlatformResolver {
            host: self.host.unwrap_or_else(HostPlatform::current),
            install_root,
            mock_binary_path: self.mock_binary_path,
            locator,
            event_sender: self.event_sender,
        }
    }
}

fn default_install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
