//! Pure formatting functions for UI output.
//!
//! Human-facing messages only. Machine-readable command output (matrix JSON,
//! tag lists) is printed by the CLI directly.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::lifecycle::ListedVersion;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render one line of `list` output, e.g. `30.2 (latest)`.
pub fn format_listed_version(listed: &ListedVersion) -> String {
    let mut line = listed.version.to_string();
    if listed.is_latest {
        line.push_str(" (latest)");
    }
    if listed.version.is_rc() {
        line.push_str(" (rc)");
    }
    if listed.version.is_fork() {
        line.push_str(" (fork)");
    }
    line
}

/// Display the active versions, oldest first.
pub fn display_version_list(versions: &[ListedVersion]) {
    println!("{}", style("Active versions:").bold());
    for listed in versions {
        println!("  {}", format_listed_version(listed));
    }
}

/// Display the follow-up steps after the directory tree changed.
///
/// # Arguments
/// * `build_dir` - Directory to test-build, if a new version was added
/// * `commit_message` - Suggested commit message
pub fn display_next_steps(build_dir: Option<&str>, commit_message: &str) {
    println!("\n{}", style("Next steps:").bold());
    println!("  1. Review changes: {}", style("git diff").cyan());
    let mut step = 2;
    if let Some(dir) = build_dir {
        println!(
            "  {}. Test build: {}",
            step,
            style(format!("docker build {}", dir)).cyan()
        );
        step += 1;
    }
    println!(
        "  {}. Commit: {}",
        step,
        style(format!("git add -A && git commit -m '{}'", commit_message)).cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionIdentifier;

    fn listed(version: &str, is_latest: bool) -> ListedVersion {
        ListedVersion {
            version: VersionIdentifier::parse(version).unwrap(),
            is_latest,
        }
    }

    #[test]
    fn test_format_listed_version() {
        assert_eq!(format_listed_version(&listed("30.2", true)), "30.2 (latest)");
        assert_eq!(format_listed_version(&listed("30.3rc1", false)), "30.3rc1 (rc)");
        assert_eq!(
            format_listed_version(&listed("29.1.knots1+bip110-v0.1", true)),
            "29.1.knots1+bip110-v0.1 (latest) (fork)"
        );
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }
}
