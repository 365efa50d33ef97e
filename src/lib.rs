pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod ui;

pub use error::{ReleaseError, Result};
