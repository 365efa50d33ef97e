use std::fmt;

/// Non-fatal issues met while changing the release directories.
/// These are reported to the user but do not stop the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The version being deprecated currently carries the `latest` tag
    DeprecatingLatest { version: String },
    /// A Dockerfile had no `ENV BITCOIN_VERSION=<old>` line to rewrite
    VersionPinNotFound { dockerfile: String, version: String },
    /// The copied source has no alpine variant
    MissingAlpineDockerfile { version: String },
    /// README.md lacks the markers around the tag table
    ReadmeMarkersMissing { readme: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DeprecatingLatest { version } => {
                write!(
                    f,
                    "Deprecating the 'latest' version ({}); the next highest version will become 'latest'",
                    version
                )
            }
            BoundaryWarning::VersionPinNotFound {
                dockerfile,
                version,
            } => {
                write!(
                    f,
                    "No 'ENV BITCOIN_VERSION={}' line found in {}",
                    version, dockerfile
                )
            }
            BoundaryWarning::MissingAlpineDockerfile { version } => {
                write!(f, "Version {} has no alpine/Dockerfile to update", version)
            }
            BoundaryWarning::ReadmeMarkersMissing { readme } => {
                write!(
                    f,
                    "{} has no '## Tags' ... '### Picking the right tag' section; tag table left unchanged",
                    readme
                )
            }
        }
    }
}
