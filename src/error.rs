use thiserror::Error;

/// Unified error type for release directory and tag operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version format: '{0}'")]
    MalformedVersion(String),

    #[error("Directory '{0}' does not exist")]
    UnknownVersion(String),

    #[error("Version {0} already exists")]
    DuplicateVersion(String),

    #[error("Source version {0} not found")]
    MissingSource(String),

    #[error("No existing version to copy from")]
    NoSourceVersion,

    #[error("Version {0} already exists in deprecated/")]
    AlreadyDeprecated(String),

    #[error("Version {0} not found in active versions")]
    NotActive(String),

    #[error("Could not find repository root: {0}")]
    RepoRoot(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience type alias for Results in knots-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a malformed-version error for the given input
    pub fn malformed(input: impl Into<String>) -> Self {
        ReleaseError::MalformedVersion(input.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a repository-root error with context
    pub fn repo_root(msg: impl Into<String>) -> Self {
        ReleaseError::RepoRoot(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::malformed("30.x");
        assert_eq!(err.to_string(), "Invalid version format: '30.x'");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_lifecycle_error_messages() {
        let error_pairs = vec![
            (ReleaseError::UnknownVersion("30.2".into()), "Directory '30.2'"),
            (ReleaseError::DuplicateVersion("30.2".into()), "already exists"),
            (ReleaseError::MissingSource("29.1".into()), "Source version 29.1"),
            (ReleaseError::AlreadyDeprecated("28.1".into()), "deprecated/"),
            (ReleaseError::NotActive("28.1".into()), "active versions"),
            (ReleaseError::NoSourceVersion, "copy from"),
        ];

        for (err, expected) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.contains(expected),
                "Error message should contain '{}', but got '{}'",
                expected,
                msg
            );
        }
    }

    #[test]
    fn test_error_constructors() {
        assert!(ReleaseError::config("bad toml")
            .to_string()
            .starts_with("Configuration error"));
        assert!(ReleaseError::repo_root("no git")
            .to_string()
            .contains("repository root"));
    }
}
