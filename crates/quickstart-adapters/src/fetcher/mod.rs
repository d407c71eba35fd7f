//! Template fetchers: turn a [`RemoteTemplate`] into a plain file tree.
//!
//! [`RemoteTemplate`]: quickstart_core::domain::RemoteTemplate

mod directory;
mod git;

pub use directory::DirectoryFetcher;
pub use git::GitFetcher;

/// Version-control metadata never left in a fetched project.
pub(crate) const VCS_DIR: &str = ".git";
