//! Lookup of installed companion packages

use async_trait::async_trait;
use std::path::PathBuf;

/// Finds a file inside an installed package
#[async_trait]
pub trait PackageLocator: Send + Sync {
    /// Absolute path of `subpath` inside `package_name`, if the package is
    /// installed and the file exists
    async fn locate(&self, package_name: &str, subpath: &str) -> Option<PathBuf>;
}
