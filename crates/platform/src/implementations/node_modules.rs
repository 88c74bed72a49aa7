//! `node_modules` package lookup
//!
//! Mirrors how a package manager lays out dependencies: starting from a
//! search root, every ancestor directory may hold a `node_modules` folder,
//! and scoped packages (`@scope/name`) live one directory deeper.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::locator::PackageLocator;

/// Locates packages in `node_modules` folders at or above `search_root`
#[derive(Debug, Clone)]
pub struct NodeModulesLocator {
    search_root: PathBuf,
}

impl NodeModulesLocator {
    pub fn new(search_root: impl Into<PathBuf>) -> Self {
        Self {
            search_root: search_root.into(),
        }
    }

    #[must_use]
    pub fn search_root(&self) -> &Path {
        &self.search_root
    }
}

fn join_segments(base: &Path, slash_separated: &str) -> PathBuf {
    slash_separated
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

#[async_trait]
impl PackageLocator for NodeModulesLocator {
    async fn locate(&self, package_name: &str, subpath: &str) -> Option<PathBuf> {
        for dir in self.search_root.ancestors() {
            let package_dir = join_segments(&dir.join("node_modules"), package_name);
            let candidate = join_segments(&package_dir, subpath);
            if fs::try_exists(&candidate).await.unwrap_or(false) {
                tracing::trace!(path = %candidate.display(), "found package file");
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install(root: &Path, package: &str, subpath: &str) -> PathBuf {
        let path = join_segments(&join_segments(&root.join("node_modules"), package), subpath);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        path
    }

    #[tokio::test]
    async fn test_locates_scoped_package_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let expected = install(temp.path(), "@gsoc2/cli-linux-x64", "bin/gsoc2-cli");
        let nested = temp.path().join("node_modules").join("@gsoc2").join("cli");
        std::fs::create_dir_all(&nested).unwrap();

        let locator = NodeModulesLocator::new(&nested);
        let found = locator.locate("@gsoc2/cli-linux-x64", "bin/gsoc2-cli").await;
        assert_eq!(found, Some(expected));
    }

    #[tokio::test]
    async fn test_missing_package_is_none() {
        let temp = TempDir::new().unwrap();
        let locator = NodeModulesLocator::new(temp.path());
        assert!(locator
            .locate("@gsoc2/cli-darwin", "bin/gsoc2-cli")
            .await
            .is_none());
    }
}
