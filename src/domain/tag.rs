//! Docker tag derivation.
//!
//! One release directory maps to a list of pinned tags (the exact version)
//! and floating tags (`major.minor`, `major`, `latest`) that move to
//! whichever version currently qualifies for them.

use super::version::{Base, VersionIdentifier};
use super::version_set::{VersionFilter, VersionSet};

/// Pseudo-version built from the development branch
pub const MASTER: &str = "master";

const ALPINE_SUFFIX: &str = "-alpine";

/// Replace every character Docker does not accept in a tag with `-`.
pub fn sanitize_tag(body: &str) -> String {
    body.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '-',
        })
        .collect()
}

/// Format a Docker tag: sanitized body prefixed with `<repo>:`.
pub fn format_tag(repo: &str, body: &str) -> String {
    format!("{}:{}", repo, sanitize_tag(body))
}

/// Ordered tag list where the first occurrence of a tag wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    pub fn new() -> Self {
        TagList::default()
    }

    /// Append a tag unless it is already present
    pub fn push(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

/// Derive the Docker tags for `version` given every other known version.
///
/// `master` yields only `master`; a name that is not a version falls back
/// to a single tag built from the name itself.
pub fn derive_tags(version: &str, versions: &VersionSet, alpine: bool, repo: &str) -> Vec<String> {
    let suffix = if alpine { ALPINE_SUFFIX } else { "" };

    if version == MASTER {
        return vec![format_tag(repo, &format!("{}{}", MASTER, suffix))];
    }

    match VersionIdentifier::parse(version) {
        Ok(parsed) => derive_for(&parsed, versions, alpine, repo),
        Err(_) => vec![format_tag(repo, &format!("{}{}", version, suffix))],
    }
}

/// Derive the Docker tags for an already parsed version.
///
/// The target does not have to be a member of `versions`; floating tags are
/// granted when it is at least as new as the current holder.
pub fn derive_for(
    version: &VersionIdentifier,
    versions: &VersionSet,
    alpine: bool,
    repo: &str,
) -> Vec<String> {
    let suffix = if alpine { ALPINE_SUFFIX } else { "" };

    let line = VersionFilter::line_of(version);
    let latest = versions.latest(&line);
    let latest_for_major = versions.latest(&line.clone().major(version.major()));
    let latest_for_minor = versions.latest(
        &line
            .clone()
            .major(version.major())
            .minor(version.minor()),
    );

    let fork_suffix = if version.is_fork() {
        format!("-{}", version.fork_label())
    } else {
        String::new()
    };

    let mut rc_tag = None;
    let mut patch_tag = None;
    let mut minor_tag = None;
    let mut major_tag = None;

    if let Some(rc) = version.rc() {
        rc_tag = Some(match version.patch() {
            Some(patch) => format!(
                "{}.{}.{}{}rc{}",
                version.major(),
                version.minor(),
                patch,
                fork_suffix,
                rc
            ),
            None => format!(
                "{}.{}{}rc{}",
                version.major(),
                version.minor(),
                fork_suffix,
                rc
            ),
        });
    } else {
        patch_tag = version.patch().map(|patch| {
            format!(
                "{}.{}.{}{}",
                version.major(),
                version.minor(),
                patch,
                fork_suffix
            )
        });
        minor_tag = Some(format!("{}.{}", version.major(), version.minor()));
        if !version.is_fork() {
            major_tag = Some(version.major().to_string());
        }
    }

    let holds = |holder: Option<&VersionIdentifier>| match (latest, holder) {
        (Some(_), Some(current)) => version >= current,
        _ => true,
    };

    let mut tags = TagList::new();
    for body in rc_tag.iter().chain(patch_tag.iter()) {
        tags.push(format_tag(repo, &format!("{}{}", body, suffix)));
    }
    if let Some(body) = minor_tag.as_deref().filter(|_| holds(latest_for_minor)) {
        tags.push(format_tag(repo, &format!("{}{}", body, suffix)));
    }
    if let Some(body) = major_tag.as_deref().filter(|_| holds(latest_for_major)) {
        tags.push(format_tag(repo, &format!("{}{}", body, suffix)));
    }

    let newest_knots = versions.latest(&VersionFilter::any().base(Base::Knots).fork(""));
    let is_newest_knots = version.base() == Base::Knots
        && !version.is_fork()
        && !version.is_rc()
        && newest_knots.is_some_and(|newest| version >= newest);

    if is_newest_knots {
        let floating = if alpine { "alpine" } else { "latest" };
        tags.push(format_tag(repo, floating));
        if let Some(major) = &major_tag {
            tags.push(format_tag(repo, &format!("{}{}", major, suffix)));
        }
    }

    tags.into_vec()
}
