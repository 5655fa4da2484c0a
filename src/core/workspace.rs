//! Workspace - the root package plus its scratch location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::Package;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Graphdoc.toml";

/// Name of the per-package scratch directory.
pub const SCRATCH_DIR_NAME: &str = ".graphdoc";

/// Error locating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `{}` in `{}` or any parent directory", MANIFEST_NAME, .0.display())]
    NotFound(PathBuf),
}

/// Find the manifest by searching upward from `start`.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        current = dir.parent();
    }
    Err(ManifestError::NotFound(start.to_path_buf()))
}

/// A loaded package and where its build outputs go.
#[derive(Debug)]
pub struct Workspace {
    package: Package,
    scratch_dir: PathBuf,
}

impl Workspace {
    /// Load the workspace for a manifest path.
    pub fn new(manifest_path: &Path) -> Result<Self> {
        let package = Package::load(manifest_path)?;
        let scratch_dir = package.root().join(SCRATCH_DIR_NAME);
        Ok(Workspace {
            package,
            scratch_dir,
        })
    }

    /// Get the root package.
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        self.package.root()
    }

    /// Get the scratch directory.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Get the project-local config file path.
    pub fn config_path(&self) -> PathBuf {
        self.root().join(SCRATCH_DIR_NAME).join("config.toml")
    }

    /// Ensure the scratch directory exists.
    pub fn ensure_scratch_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.scratch_dir).with_context(|| {
            format!(
                "failed to create scratch directory: {}",
                self.scratch_dir.display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path) -> PathBuf {
        let manifest_path = dir.join(MANIFEST_NAME);
        std::fs::write(
            &manifest_path,
            "[package]\nname = \"testws\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        manifest_path
    }

    #[test]
    fn test_find_manifest_searches_upward() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = write_manifest(tmp.path());
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_manifest(&nested).unwrap(), manifest_path);
    }

    #[test]
    fn test_find_manifest_missing() {
        let tmp = TempDir::new().unwrap();
        let err = find_manifest(tmp.path()).unwrap_err();
        assert!(err.to_string().contains(MANIFEST_NAME));
    }

    #[test]
    fn test_workspace_paths() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::new(&write_manifest(tmp.path())).unwrap();

        assert_eq!(ws.package().name(), "testws");
        assert_eq!(ws.scratch_dir(), tmp.path().join(".graphdoc"));
        assert_eq!(
            ws.config_path(),
            tmp.path().join(".graphdoc").join("config.toml")
        );
    }
}
