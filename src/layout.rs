//! On-disk layout of the Docker repository.
//!
//! ```text
//! <root>/
//!   30.2/Dockerfile
//!   30.2/alpine/Dockerfile
//!   master/Dockerfile
//!   deprecated/28.1/...
//!   README.md
//! ```

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LayoutConfig;
use crate::domain::{BuildDir, VersionIdentifier, VersionSet};
use crate::error::{ReleaseError, Result};

pub const DOCKERFILE: &str = "Dockerfile";
pub const ALPINE_DIR: &str = "alpine";

/// Locate the repository root starting from `start`.
///
/// Inside a git checkout this is the working tree root; outside of one the
/// start directory itself is used.
pub fn discover_root(start: &Path) -> Result<PathBuf> {
    match Repository::discover(start) {
        Ok(repo) => repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleaseError::repo_root("bare repositories have no working tree")),
        Err(e) => {
            debug!(start = %start.display(), error = %e, "not inside a git repository");
            if start.is_dir() {
                Ok(start.to_path_buf())
            } else {
                Err(ReleaseError::repo_root(format!(
                    "'{}' is not a directory",
                    start.display()
                )))
            }
        }
    }
}

/// View of the release directories below a repository root
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    config: LayoutConfig,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, config: LayoutConfig) -> Self {
        Layout {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn deprecated_dir(&self) -> PathBuf {
        self.root.join(&self.config.deprecated_dir)
    }

    pub fn deprecated_version_dir(&self, name: &str) -> PathBuf {
        self.deprecated_dir().join(name)
    }

    /// Whether `name` is a directory at the top level
    pub fn is_active(&self, name: &str) -> bool {
        self.version_dir(name).is_dir()
    }

    /// Whether `name` exists either active or deprecated
    pub fn version_exists(&self, version: &VersionIdentifier) -> bool {
        self.version_dir(version.as_str()).exists()
            || self.deprecated_version_dir(version.as_str()).exists()
    }

    /// Top-level directories holding a Dockerfile, `master` included
    pub fn build_dirs(&self) -> Result<Vec<BuildDir>> {
        let dirs = self
            .dockerfile_dirs()?
            .into_iter()
            .map(|name| {
                let has_alpine = self
                    .version_dir(&name)
                    .join(ALPINE_DIR)
                    .join(DOCKERFILE)
                    .is_file();
                BuildDir::new(name, has_alpine)
            })
            .collect();
        Ok(dirs)
    }

    /// Names of the active version directories
    pub fn version_names(&self) -> Result<Vec<String>> {
        let names = self
            .dockerfile_dirs()?
            .into_iter()
            .filter(|name| *name != self.config.master_dir)
            .filter(|name| match VersionIdentifier::parse(name) {
                Ok(_) => true,
                Err(_) => {
                    debug!(%name, "skipping directory that is not a version");
                    false
                }
            })
            .collect();
        Ok(names)
    }

    /// Snapshot of the active versions as they are on disk right now
    pub fn versions(&self) -> Result<VersionSet> {
        Ok(VersionSet::from_names(self.version_names()?))
    }

    fn dockerfile_dirs(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ReleaseError::Io(e.into()))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if name.starts_with('.')
                || name == self.config.deprecated_dir
                || self.config.ignored_dirs.iter().any(|d| d == name)
            {
                continue;
            }
            if entry.path().join(DOCKERFILE).is_file() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
