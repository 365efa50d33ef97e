// tests/config_test.rs
use knots_release::config::{load_config, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.docker.repo, "bitcoinknots/bitcoin");
    assert_eq!(config.layout.deprecated_dir, "deprecated");
    assert_eq!(config.layout.master_dir, "master");
    assert!(config.layout.ignored_dirs.contains(&"scripts".to_string()));
    assert_eq!(config.readme.file, "README.md");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[docker]
repo = "example/knots"

[layout]
deprecated_dir = "retired"

[readme]
dockerfile_url_base = "https://example.com/blob/main"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let root = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), root.path()).unwrap();
    assert_eq!(config.docker.repo, "example/knots");
    assert_eq!(config.layout.deprecated_dir, "retired");
    assert_eq!(config.layout.master_dir, "master");
    assert_eq!(config.readme.dockerfile_url_base, "https://example.com/blob/main");
    assert_eq!(config.readme.file, "README.md");
}

#[test]
fn test_explicit_file_beats_repository_file() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        "[docker]\nrepo = \"local/repo\"\n",
    )
    .unwrap();
    let mut explicit = NamedTempFile::new().unwrap();
    explicit
        .write_all(b"[docker]\nrepo = \"explicit/repo\"\n")
        .unwrap();
    explicit.flush().unwrap();

    let config = load_config(Some(explicit.path()), root.path()).unwrap();
    assert_eq!(config.docker.repo, "explicit/repo");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");
    assert!(load_config(Some(missing.as_path()), root.path()).is_err());
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "[docker\nrepo = 1\n").unwrap();

    let err = load_config(None, root.path()).unwrap_err();
    assert!(
        err.to_string().starts_with("Configuration error:"),
        "got: {}",
        err
    );
}

#[test]
#[serial]
fn test_repository_file_is_found() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        "[docker]\nrepo = \"local/repo\"\n",
    )
    .unwrap();

    let config = load_config(None, root.path()).unwrap();
    assert_eq!(config.docker.repo, "local/repo");
}

#[test]
#[serial]
fn test_user_config_directory_fallback() {
    let user = TempDir::new().unwrap();
    fs::write(
        user.path().join(format!(".{}", CONFIG_FILE_NAME)),
        "[docker]\nrepo = \"user/repo\"\n",
    )
    .unwrap();
    let root = TempDir::new().unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", user.path());
    let loaded = load_config(None, root.path());
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    if cfg!(target_os = "linux") {
        assert_eq!(loaded.unwrap().docker.repo, "user/repo");
    } else {
        assert!(loaded.is_ok());
    }
}

#[test]
#[serial]
fn test_no_file_anywhere_gives_defaults() {
    let user = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", user.path());
    let loaded = load_config(None, root.path());
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    if cfg!(target_os = "linux") {
        assert_eq!(loaded.unwrap(), Config::default());
    } else {
        assert!(loaded.is_ok());
    }
}
