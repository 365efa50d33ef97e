use std::collections::BTreeMap;

use super::version::{Base, VersionIdentifier};

/// Predicates for slicing a [`VersionSet`]. A `None` field places no
/// constraint on that part of the version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionFilter {
    pub base: Option<Base>,
    pub fork: Option<String>,
    pub major: Option<u64>,
    pub minor: Option<u64>,
}

impl VersionFilter {
    /// Filter that matches every version
    pub fn any() -> Self {
        VersionFilter::default()
    }

    /// Filter matching the release line (base and fork) of `version`
    pub fn line_of(version: &VersionIdentifier) -> Self {
        VersionFilter::any()
            .base(version.base())
            .fork(version.fork())
    }

    pub fn base(mut self, base: Base) -> Self {
        self.base = Some(base);
        self
    }

    pub fn fork(mut self, fork: impl Into<String>) -> Self {
        self.fork = Some(fork.into());
        self
    }

    pub fn major(mut self, major: u64) -> Self {
        self.major = Some(major);
        self
    }

    pub fn minor(mut self, minor: u64) -> Self {
        self.minor = Some(minor);
        self
    }

    /// Check whether a version satisfies every supplied predicate
    pub fn matches(&self, version: &VersionIdentifier) -> bool {
        self.base.map_or(true, |b| version.base() == b)
            && self.fork.as_deref().map_or(true, |f| version.fork() == f)
            && self.major.map_or(true, |m| version.major() == m)
            && self.minor.map_or(true, |m| version.minor() == m)
    }
}

/// Immutable snapshot of the versions known at one point in time.
///
/// Built from a directory listing; names that do not parse as versions are
/// not version directories and are left out.
#[derive(Debug, Clone, Default)]
pub struct VersionSet {
    versions: BTreeMap<String, VersionIdentifier>,
}

impl VersionSet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let versions = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                VersionIdentifier::parse(name)
                    .ok()
                    .map(|version| (name.to_string(), version))
            })
            .collect();

        VersionSet { versions }
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.versions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&VersionIdentifier> {
        self.versions.get(name)
    }

    /// All versions in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = &VersionIdentifier> {
        self.filtered(&VersionFilter::any()).into_iter()
    }

    /// Versions matching `filter`, in ascending version order.
    ///
    /// Versions of equal precedence are ordered by their patch token.
    pub fn filtered(&self, filter: &VersionFilter) -> Vec<&VersionIdentifier> {
        let mut matching: Vec<&VersionIdentifier> = self
            .versions
            .values()
            .filter(|v| filter.matches(v))
            .collect();
        matching.sort_by(|a, b| a.total_cmp(b));
        matching
    }

    /// Highest non-RC version matching `filter`.
    ///
    /// Release candidates are never eligible, so a slice holding only RCs
    /// has no latest version.
    pub fn latest(&self, filter: &VersionFilter) -> Option<&VersionIdentifier> {
        self.versions
            .values()
            .filter(|v| !v.is_rc() && filter.matches(v))
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Highest version matching `filter`, release candidates included
    pub fn newest(&self, filter: &VersionFilter) -> Option<&VersionIdentifier> {
        self.versions
            .values()
            .filter(|v| filter.matches(v))
            .max_by(|a, b| a.total_cmp(b))
    }
}
