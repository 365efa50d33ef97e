// Shared fixture helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const README: &str = "# Bitcoin Knots Docker\n\n## Tags\n\n- placeholder\n\n### Picking the right tag\n\nPick wisely.\n";

/// Create `<root>/<dir>/Dockerfile` pinned to `version`
pub fn dockerfile(root: &Path, dir: &str, version: &str) {
    let path = root.join(dir);
    fs::create_dir_all(&path).unwrap();
    fs::write(
        path.join("Dockerfile"),
        format!("FROM debian:bookworm-slim\nENV BITCOIN_VERSION={}\nRUN true\n", version),
    )
    .unwrap();
}

/// Create a version directory with a Debian and optionally an Alpine Dockerfile
pub fn version_dir(root: &Path, version: &str, alpine: bool) {
    dockerfile(root, version, version);
    if alpine {
        dockerfile(root, &format!("{}/alpine", version), version);
    }
}

/// Temporary repository holding the given versions, `master/` and a README
pub fn repo(versions: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for version in versions {
        version_dir(root, version, true);
    }
    dockerfile(root, "master", "master");
    fs::create_dir_all(root.join(".github")).unwrap();
    fs::write(root.join("README.md"), README).unwrap();
    temp
}
