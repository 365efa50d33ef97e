use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Name of the per-repository configuration file
pub const CONFIG_FILE_NAME: &str = "knots-release.toml";

/// Represents the complete configuration for knots-release.
///
/// Every section is optional; missing values fall back to the layout used by
/// the bitcoinknots Docker repository.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub docker: DockerConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub readme: ReadmeConfig,
}

fn default_repo() -> String {
    "bitcoinknots/bitcoin".to_string()
}

fn default_deprecated_dir() -> String {
    "deprecated".to_string()
}

fn default_master_dir() -> String {
    "master".to_string()
}

fn default_ignored_dirs() -> Vec<String> {
    vec!["scripts".to_string(), ".github".to_string()]
}

fn default_readme_file() -> String {
    "README.md".to_string()
}

fn default_dockerfile_url_base() -> String {
    "https://github.com/yasutakumi/bitcoinknots-docker/blob/master".to_string()
}

/// Docker registry settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DockerConfig {
    /// Repository images are tagged in (`<repo>:<tag>`)
    #[serde(default = "default_repo")]
    pub repo: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        DockerConfig {
            repo: default_repo(),
        }
    }
}

/// Names of the special top-level directories.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_deprecated_dir")]
    pub deprecated_dir: String,

    #[serde(default = "default_master_dir")]
    pub master_dir: String,

    /// Directories that are never versions nor build targets
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            deprecated_dir: default_deprecated_dir(),
            master_dir: default_master_dir(),
            ignored_dirs: default_ignored_dirs(),
        }
    }
}

/// README tag table settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReadmeConfig {
    #[serde(default = "default_readme_file")]
    pub file: String,

    /// Prefix for the Dockerfile links in the tag table
    #[serde(default = "default_dockerfile_url_base")]
    pub dockerfile_url_base: String,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        ReadmeConfig {
            file: default_readme_file(),
            dockerfile_url_base: default_dockerfile_url_base(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `knots-release.toml` in the repository root
/// 3. `~/.config/.knots-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    let local = repo_root.join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))
}
