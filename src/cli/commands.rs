use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{Cli, Command};
use crate::config::{self, Config};
use crate::domain::{self, GitRef};
use crate::layout::{self, Layout};
use crate::lifecycle::ReleaseManager;
use crate::ui;

/// Run one CLI invocation.
pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        root,
        config: config_path,
        command,
    } = cli;

    // Only commands that look at the directory tree need a root and config.
    let workspace = || -> Result<(Layout, Config)> {
        let root = resolve_root(root.clone())?;
        let config = config::load_config(config_path.as_deref(), &root)
            .with_context(|| format!("Error loading config for {}", root.display()))?;
        Ok((Layout::new(&root, config.layout.clone()), config))
    };

    match command {
        Command::ShouldPush { git_ref, version } => {
            println!("{}", should_push_output(&git_ref, version.as_deref()));
        }
        Command::Matrix { git_ref, version } => {
            let (layout, _) = workspace()?;
            println!("{}", matrix_output(&layout, &git_ref, version.as_deref())?);
        }
        Command::Tags {
            version,
            alpine,
            repo,
        } => {
            let (layout, config) = workspace()?;
            let repo = repo.unwrap_or(config.docker.repo);
            println!("{}", tags_output(&layout, &version, alpine, &repo)?);
        }
        Command::Add {
            version,
            from_version,
        } => {
            let (layout, config) = workspace()?;
            add(&manager(layout, &config), &version, from_version.as_deref())?;
        }
        Command::Deprecate { version } => {
            let (layout, config) = workspace()?;
            deprecate(&manager(layout, &config), &version)?;
        }
        Command::List => {
            let (layout, config) = workspace()?;
            let listed = manager(layout, &config).list()?;
            ui::display_version_list(&listed);
        }
    }

    Ok(())
}

/// `matrix` output: compact JSON
pub fn matrix_output(layout: &Layout, git_ref: &str, version: Option<&str>) -> Result<String> {
    let dirs = layout.build_dirs()?;
    let matrix = domain::build_matrix(&GitRef::new(git_ref), version, &dirs)?;
    Ok(matrix.to_json()?)
}

/// `tags` output: space separated tag list
pub fn tags_output(layout: &Layout, version: &str, alpine: bool, repo: &str) -> Result<String> {
    let versions = layout.versions()?;
    Ok(domain::derive_tags(version, &versions, alpine, repo).join(" "))
}

/// `should-push` output: `true` or `false`
pub fn should_push_output(git_ref: &str, version: Option<&str>) -> &'static str {
    if domain::should_push(&GitRef::new(git_ref), version) {
        "true"
    } else {
        "false"
    }
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => {
            let cwd = std::env::current_dir().context("Could not read current directory")?;
            Ok(layout::discover_root(&cwd)?)
        }
    }
}

fn manager(layout: Layout, config: &Config) -> ReleaseManager {
    ReleaseManager::new(layout, config.readme.clone())
}

fn add(manager: &ReleaseManager, version: &str, from: Option<&str>) -> Result<()> {
    let outcome = manager.add(version, from)?;

    ui::display_status(&format!(
        "Added version {} (copied from {})",
        outcome.version, outcome.source
    ));
    for warning in &outcome.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_success(&format!("Successfully added version {}", outcome.version));
    if outcome.auto_deprecated {
        ui::display_success(&format!(
            "Auto-deprecated {} (same major version)",
            outcome.source
        ));
    }

    let build_dir = outcome.target_dir.display().to_string();
    ui::display_next_steps(Some(&build_dir), &format!("Add v{}", outcome.version));
    Ok(())
}

fn deprecate(manager: &ReleaseManager, version: &str) -> Result<()> {
    let outcome = manager.deprecate(version)?;

    for warning in &outcome.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_success(&format!(
        "Successfully deprecated version {} -> {}",
        outcome.version,
        outcome.target_dir.display()
    ));
    ui::display_next_steps(None, &format!("Deprecate v{}", outcome.version));
    Ok(())
}
