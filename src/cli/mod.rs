//! Command-line surface.
//!
//! Argument definitions live here; `commands` turns them into calls on the
//! domain and lifecycle layers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;

pub use commands::run;

#[derive(Parser, Debug)]
#[command(
    name = "knots-release",
    version,
    about = "Manage Bitcoin Knots Docker release directories and derive their tags"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Repository root (default: enclosing git working tree)"
    )]
    pub root: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Output build matrix as JSON for GitHub Actions
    Matrix {
        #[arg(long = "ref", help = "GitHub ref (e.g., refs/tags/v30.2, refs/heads/master)")]
        git_ref: String,

        #[arg(long, help = "Override: build only this version (e.g., 30.2)")]
        version: Option<String>,
    },

    /// Output Docker tags for a version
    Tags {
        #[arg(long, help = "Version (e.g., 30.2, master)")]
        version: String,

        #[arg(long, help = "Generate alpine tags")]
        alpine: bool,

        #[arg(long, help = "Docker repo (default: from config, bitcoinknots/bitcoin)")]
        repo: Option<String>,
    },

    /// Check if images should be pushed (true/false)
    ShouldPush {
        #[arg(long = "ref", help = "GitHub ref (e.g., refs/tags/v30.2, refs/heads/master)")]
        git_ref: String,

        #[arg(long, help = "Override: if set, will push this version (e.g., 30.2)")]
        version: Option<String>,
    },

    /// Add a new version by copying an existing one
    Add {
        #[arg(help = "Version to add (e.g., 29.3, 31.0)")]
        version: String,

        #[arg(help = "Source version to copy from (default: same major or latest)")]
        from_version: Option<String>,
    },

    /// Move an active version to deprecated/
    Deprecate {
        #[arg(help = "Version to deprecate")]
        version: String,
    },

    /// List active versions
    List,
}
