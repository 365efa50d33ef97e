//! User interface module - human-facing terminal output.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_next_steps, display_status,
    display_success, display_version_list, format_listed_version,
};
