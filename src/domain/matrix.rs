//! CI build matrix selection.

use serde::Serialize;

use super::git_ref::GitRef;
use super::tag::MASTER;
use crate::error::{ReleaseError, Result};

/// Image flavour built from a release directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Debian,
    Alpine,
}

/// A top-level directory that can be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDir {
    pub name: String,
    /// Whether `alpine/Dockerfile` exists inside the directory
    pub has_alpine: bool,
}

impl BuildDir {
    pub fn new(name: impl Into<String>, has_alpine: bool) -> Self {
        BuildDir {
            name: name.into(),
            has_alpine,
        }
    }
}

/// One CI job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub version: String,
    pub variant: Variant,
}

/// GitHub Actions matrix, serialized as `{"include":[...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Matrix {
    pub include: Vec<MatrixEntry>,
}

impl Matrix {
    /// Compact JSON for `$GITHUB_OUTPUT`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Select the jobs to build.
///
/// An explicit version override wins, then a `refs/tags/v<version>` ref;
/// any other ref builds every known directory. Named directories that are
/// not known fail with `UnknownVersion`.
pub fn build_matrix(
    git_ref: &GitRef,
    version_override: Option<&str>,
    known_dirs: &[BuildDir],
) -> Result<Matrix> {
    let requested = version_override.or_else(|| git_ref.tag_version());

    let mut selected: Vec<&BuildDir> = match requested {
        Some(name) => {
            let dir = known_dirs
                .iter()
                .find(|d| d.name == name)
                .ok_or_else(|| ReleaseError::UnknownVersion(name.to_string()))?;
            vec![dir]
        }
        None => known_dirs.iter().collect(),
    };
    selected.sort_by(|a, b| a.name.cmp(&b.name));

    let mut include = Vec::new();
    for dir in selected {
        include.push(MatrixEntry {
            version: dir.name.clone(),
            variant: Variant::Debian,
        });
        if dir.has_alpine {
            include.push(MatrixEntry {
                version: dir.name.clone(),
                variant: Variant::Alpine,
            });
        }
    }

    Ok(Matrix { include })
}

/// Decide whether built images get pushed.
///
/// A manual version override pushes anything but `master`; otherwise only
/// release tag refs push.
pub fn should_push(git_ref: &GitRef, version_override: Option<&str>) -> bool {
    match version_override {
        Some(version) => version != MASTER,
        None => git_ref
            .tag_version()
            .is_some_and(|version| version != MASTER),
    }
}
