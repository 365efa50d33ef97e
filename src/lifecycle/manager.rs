use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::dockerfile::update_dockerfile;
use super::fs_ops::{copy_tree, move_dir, write_atomic};
use super::readme::{render_tag_section, replace_tag_section};
use crate::boundary::BoundaryWarning;
use crate::config::ReadmeConfig;
use crate::domain::{VersionFilter, VersionIdentifier, VersionSet};
use crate::error::{ReleaseError, Result};
use crate::layout::{Layout, ALPINE_DIR, DOCKERFILE};

/// Result of adding a version
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub version: VersionIdentifier,
    /// Version the new directory was copied from
    pub source: VersionIdentifier,
    pub target_dir: PathBuf,
    /// Whether `source` was moved to deprecated/ as part of the add
    pub auto_deprecated: bool,
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of deprecating a version
#[derive(Debug, Clone, PartialEq)]
pub struct DeprecateOutcome {
    pub version: VersionIdentifier,
    pub target_dir: PathBuf,
    pub warnings: Vec<BoundaryWarning>,
}

/// One row of `list` output
#[derive(Debug, Clone, PartialEq)]
pub struct ListedVersion {
    pub version: VersionIdentifier,
    /// Latest non-RC version of its base and fork
    pub is_latest: bool,
}

/// Adds and retires release directories.
///
/// Every operation reads the version set fresh from disk; nothing is cached
/// between steps.
#[derive(Debug, Clone)]
pub struct ReleaseManager {
    layout: Layout,
    readme: ReadmeConfig,
}

impl ReleaseManager {
    pub fn new(layout: Layout, readme: ReadmeConfig) -> Self {
        ReleaseManager { layout, readme }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Add `version` by copying an existing version directory.
    ///
    /// Without `from`, the source is the newest active version of the same
    /// release line and major, falling back to the latest of the line, of
    /// the base, and finally of everything. The source is deprecated when it
    /// is active, shares the major version and the new version is not an RC.
    ///
    /// The copy is assembled in a hidden staging directory and renamed into
    /// place once its Dockerfiles are rewritten. Steps after that rename
    /// (auto-deprecation, README) are not rolled back on failure.
    pub fn add(&self, version: &str, from: Option<&str>) -> Result<AddOutcome> {
        let version = VersionIdentifier::parse(version)?;
        if self.layout.version_exists(&version) {
            return Err(ReleaseError::DuplicateVersion(version.to_string()));
        }

        let (source, source_dir, source_is_active) = match from {
            Some(from) => self.explicit_source(from)?,
            None => {
                let versions = self.layout.versions()?;
                let source = default_source(&version, &versions)
                    .cloned()
                    .ok_or(ReleaseError::NoSourceVersion)?;
                let dir = self.layout.version_dir(source.as_str());
                (source, dir, true)
            }
        };

        let auto_deprecated =
            source_is_active && source.major() == version.major() && !version.is_rc();

        info!(%version, %source, auto_deprecated, "adding version");

        let mut warnings = Vec::new();
        let target_dir = self.layout.version_dir(version.as_str());

        let staging = tempfile::Builder::new()
            .prefix(".stage-")
            .tempdir_in(self.layout.root())?;
        let staged = staging.path().join(version.as_str());
        debug!(from = %source_dir.display(), to = %staged.display(), "copying");
        copy_tree(&source_dir, &staged)?;
        warnings.extend(rewrite_pins(&staged, &source, &version)?);
        fs::rename(&staged, &target_dir)?;
        staging.close()?;

        if auto_deprecated {
            info!(%source, "auto-deprecating");
            self.move_to_deprecated(&source)?;
        }

        warnings.extend(self.regenerate_readme()?);

        Ok(AddOutcome {
            version,
            source,
            target_dir,
            auto_deprecated,
            warnings,
        })
    }

    /// Move an active version into deprecated/ and refresh the README.
    pub fn deprecate(&self, version: &str) -> Result<DeprecateOutcome> {
        let version = VersionIdentifier::parse(version)?;
        let name = version.as_str();

        if !self.layout.version_dir(name).exists() {
            return Err(ReleaseError::NotActive(version.to_string()));
        }
        if self.layout.deprecated_version_dir(name).exists() {
            return Err(ReleaseError::AlreadyDeprecated(version.to_string()));
        }

        let mut warnings = Vec::new();
        let versions = self.layout.versions()?;
        if versions.latest(&VersionFilter::any()) == Some(&version) {
            warnings.push(BoundaryWarning::DeprecatingLatest {
                version: version.to_string(),
            });
        }

        info!(%version, "deprecating version");
        self.move_to_deprecated(&version)?;
        warnings.extend(self.regenerate_readme()?);

        Ok(DeprecateOutcome {
            target_dir: self.layout.deprecated_version_dir(name),
            version,
            warnings,
        })
    }

    /// Active versions in ascending order.
    pub fn list(&self) -> Result<Vec<ListedVersion>> {
        let versions = self.layout.versions()?;
        let listed = versions
            .iter()
            .map(|version| ListedVersion {
                is_latest: versions.latest(&VersionFilter::line_of(version)) == Some(version),
                version: version.clone(),
            })
            .collect();
        Ok(listed)
    }

    /// Rewrite the README tag table from the versions currently on disk.
    pub fn regenerate_readme(&self) -> Result<Vec<BoundaryWarning>> {
        let path = self.layout.root().join(&self.readme.file);
        let content = fs::read_to_string(&path)?;
        let versions = self.layout.versions()?;
        let section = render_tag_section(&versions, &self.readme.dockerfile_url_base);

        match replace_tag_section(&content, &section)? {
            Some(updated) => {
                debug!(readme = %path.display(), "updating tag table");
                write_atomic(&path, &updated)?;
                Ok(Vec::new())
            }
            None => {
                warn!(readme = %path.display(), "tag table markers not found");
                Ok(vec![BoundaryWarning::ReadmeMarkersMissing {
                    readme: self.readme.file.clone(),
                }])
            }
        }
    }

    fn explicit_source(&self, from: &str) -> Result<(VersionIdentifier, PathBuf, bool)> {
        let source = VersionIdentifier::parse(from)?;
        let active = self.layout.version_dir(source.as_str());
        if active.exists() {
            return Ok((source, active, true));
        }
        let deprecated = self.layout.deprecated_version_dir(source.as_str());
        if deprecated.exists() {
            return Ok((source, deprecated, false));
        }
        Err(ReleaseError::MissingSource(source.to_string()))
    }

    fn move_to_deprecated(&self, version: &VersionIdentifier) -> Result<()> {
        let src = self.layout.version_dir(version.as_str());
        let dst = self.layout.deprecated_version_dir(version.as_str());
        debug!(from = %src.display(), to = %dst.display(), "moving");
        move_dir(&src, &dst)
    }
}

/// Pick the directory a new version is copied from
fn default_source<'a>(
    version: &VersionIdentifier,
    versions: &'a VersionSet,
) -> Option<&'a VersionIdentifier> {
    let line = VersionFilter::line_of(version);
    versions
        .newest(&line.clone().major(version.major()))
        .or_else(|| versions.latest(&line))
        .or_else(|| versions.latest(&VersionFilter::any().base(version.base())))
        .or_else(|| versions.latest(&VersionFilter::any()))
}

fn rewrite_pins(
    dir: &Path,
    source: &VersionIdentifier,
    version: &VersionIdentifier,
) -> Result<Vec<BoundaryWarning>> {
    let mut warnings = Vec::new();

    let main = dir.join(DOCKERFILE);
    if !update_dockerfile(&main, source.as_str(), version.as_str())? {
        warnings.push(BoundaryWarning::VersionPinNotFound {
            dockerfile: DOCKERFILE.to_string(),
            version: source.to_string(),
        });
    }

    let alpine = dir.join(ALPINE_DIR).join(DOCKERFILE);
    if !alpine.is_file() {
        warnings.push(BoundaryWarning::MissingAlpineDockerfile {
            version: source.to_string(),
        });
    } else if !update_dockerfile(&alpine, source.as_str(), version.as_str())? {
        warnings.push(BoundaryWarning::VersionPinNotFound {
            dockerfile: format!("{}/{}", ALPINE_DIR, DOCKERFILE),
            version: source.to_string(),
        });
    }

    Ok(warnings)
}
