//! README tag table generation.
//!
//! The table lives between the `## Tags` heading and the
//! `### Picking the right tag` heading and is regenerated from the active
//! versions after every add or deprecate.

use regex::{Captures, Regex};

use crate::domain::{sanitize_tag, Base, VersionFilter, VersionSet};
use crate::error::Result;

const TAGS_SECTION: &str = r"(?s)(## Tags\n\n)(.*?)(### Picking the right tag)";

/// Render the tag table for every active version, newest first.
///
/// Fork versions are listed separately under `## Alternative Tags`.
pub fn render_tag_section(versions: &VersionSet, dockerfile_url_base: &str) -> String {
    let latest = versions.latest(&VersionFilter::any().base(Base::Knots).fork(""));

    let mut lines: Vec<String> = Vec::new();
    let mut alt_lines: Vec<String> = Vec::new();

    let ordered: Vec<_> = versions.iter().collect();
    for version in ordered.into_iter().rev() {
        let line = VersionFilter::line_of(version).major(version.major());
        let latest_major = versions.latest(&line);
        let latest_minor = versions.latest(&line.minor(version.minor()));

        let mut tags = vec![sanitize_tag(version.as_str())];
        if !version.is_rc() && !version.is_fork() {
            if latest_minor == Some(version) {
                tags.push(sanitize_tag(&format!(
                    "{}.{}",
                    version.major(),
                    version.minor()
                )));
            }
            if latest_major == Some(version) {
                tags.push(sanitize_tag(&version.major().to_string()));
            }
            if latest == Some(version) {
                tags.push("latest".to_string());
            }
        }

        let name = version.as_str();
        let debian_tags = tags
            .iter()
            .map(|t| format!("`{}`", t))
            .collect::<Vec<_>>()
            .join(", ");
        let alpine_tags = tags
            .iter()
            .map(|t| {
                if t == "latest" {
                    "`alpine`".to_string()
                } else {
                    format!("`{}-alpine`", t)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let target = if version.is_fork() {
            &mut alt_lines
        } else {
            &mut lines
        };
        target.push(format!(
            "- {} ([{name}/Dockerfile]({base}/{name}/Dockerfile)) [**multi-platform**]",
            debian_tags,
            name = name,
            base = dockerfile_url_base
        ));
        target.push(format!(
            "- {} ([{name}/alpine/Dockerfile]({base}/{name}/alpine/Dockerfile))",
            alpine_tags,
            name = name,
            base = dockerfile_url_base
        ));
        target.push(String::new());
    }

    if !alt_lines.is_empty() {
        lines.push("## Alternative Tags".to_string());
        lines.push(String::new());
        lines.extend(alt_lines);
    }

    lines.join("\n")
}

/// Swap every tag table in `content` for `section`.
///
/// Returns `None` when the README has no tag table markers.
pub fn replace_tag_section(content: &str, section: &str) -> Result<Option<String>> {
    let re = Regex::new(TAGS_SECTION)?;
    if !re.is_match(content) {
        return Ok(None);
    }
    let updated = re.replace_all(content, |caps: &Captures<'_>| {
        format!("{}{}\n{}", &caps[1], section, &caps[3])
    });
    Ok(Some(updated.into_owned()))
}
