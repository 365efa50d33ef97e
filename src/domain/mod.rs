//! Domain logic - pure version, tag and matrix rules independent of the filesystem

pub mod git_ref;
pub mod matrix;
pub mod tag;
pub mod version;
pub mod version_set;

pub use git_ref::GitRef;
pub use matrix::{build_matrix, should_push, BuildDir, Matrix, MatrixEntry, Variant};
pub use tag::{derive_for, derive_tags, format_tag, sanitize_tag, TagList, MASTER};
pub use version::{Base, VersionIdentifier};
pub use version_set::{VersionFilter, VersionSet};
