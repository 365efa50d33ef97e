const TAG_PREFIX: &str = "refs/tags/v";

/// A git ref as handed over by CI (e.g. `refs/tags/v30.2`, `refs/heads/master`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    pub name: String,
}

impl GitRef {
    /// Create a new ref
    pub fn new(name: impl Into<String>) -> Self {
        GitRef { name: name.into() }
    }

    /// Version named by a release tag ref (`refs/tags/v30.2` -> `30.2`).
    ///
    /// Branch refs and tags without the `v` prefix name no version.
    pub fn tag_version(&self) -> Option<&str> {
        self.name.strip_prefix(TAG_PREFIX)
    }

    /// Check if this ref is a release tag
    pub fn is_release_tag(&self) -> bool {
        self.tag_version().is_some()
    }
}
