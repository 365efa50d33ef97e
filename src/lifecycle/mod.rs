//! Release lifecycle - adding, deprecating and listing version directories
//!
//! - `manager` - The add / deprecate / list operations
//! - `dockerfile` - `ENV BITCOIN_VERSION` pin rewriting
//! - `readme` - README tag table generation
//! - `fs_ops` - Copy, move and atomic write primitives

pub mod dockerfile;
pub mod fs_ops;
pub mod manager;
pub mod readme;

pub use manager::{AddOutcome, DeprecateOutcome, ListedVersion, ReleaseManager};
