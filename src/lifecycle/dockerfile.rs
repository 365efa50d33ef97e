use std::fs;
use std::path::Path;

use regex::{NoExpand, Regex};

use crate::error::Result;

const VERSION_PIN: &str = "ENV BITCOIN_VERSION=";

/// Rewrite `ENV BITCOIN_VERSION=<old>` to `<new>`.
///
/// Returns `None` when the content has no such line.
pub fn rewrite_version_pin(content: &str, old: &str, new: &str) -> Result<Option<String>> {
    let re = Regex::new(&format!(
        "{}{}",
        regex::escape(VERSION_PIN),
        regex::escape(old)
    ))?;
    if !re.is_match(content) {
        return Ok(None);
    }
    let replacement = format!("{}{}", VERSION_PIN, new);
    Ok(Some(re.replace_all(content, NoExpand(&replacement)).into_owned()))
}

/// Update the version pin of the Dockerfile at `path` in place.
///
/// Returns whether a pin was found and rewritten.
pub fn update_dockerfile(path: &Path, old: &str, new: &str) -> Result<bool> {
    let content = fs::read_to_string(path)?;
    match rewrite_version_pin(&content, old, new)? {
        Some(updated) => {
            fs::write(path, updated)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
