//! # Recast Project
//!
//! Collaborators around the core pipeline: turning a GitHub URL or an
//! uploaded archive into a source tree on disk, zipping a finished
//! destination tree, and allocating per-job working directories.
//! Acquisition failures are job-fatal and never retried.

mod acquire;
mod archive;
mod error;
mod github;
mod tempdirs;

pub use acquire::{clone_repo, extract_zip};
pub use archive::create_zip_archive;
pub use error::{ProjectError, Result};
pub use github::parse_github_url;
pub use tempdirs::create_temp_dir;
