//! Copies a template out of a local directory.
//!
//! Used for offline work and tests: a [`RemoteTemplate`] whose url is a path
//! (optionally `file://`-prefixed). The branch is ignored.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use quickstart_core::{
    application::{ApplicationError, ports::TemplateFetcher},
    domain::RemoteTemplate,
    error::QuickstartResult,
};

use super::VCS_DIR;
use crate::filesystem::map_io_error;

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryFetcher;

impl DirectoryFetcher {
    pub fn new() -> Self {
        Self
    }

    fn source_root(template: &RemoteTemplate) -> PathBuf {
        let url = template.url.as_str();
        PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
    }
}

impl TemplateFetcher for DirectoryFetcher {
    #[instrument(skip_all, fields(template = %template, dest = %destination.display()))]
    fn fetch(&self, template: &RemoteTemplate, destination: &Path) -> QuickstartResult<()> {
        let root = Self::source_root(template);
        if !root.is_dir() {
            return Err(ApplicationError::FetchFailed {
                template: template.spec(),
                reason: format!("{} is not a directory", root.display()),
            }
            .into());
        }

        std::fs::create_dir_all(destination)
            .map_err(|e| map_io_error(destination, e, "create directory"))?;

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| e.file_name() != VCS_DIR);

        let mut copied = 0usize;
        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::FetchFailed {
                template: template.spec(),
                reason: e.to_string(),
            })?;
            // min_depth(1) guarantees entries live under root
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let target = destination.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else if entry.file_type().is_symlink() {
                copy_symlink(entry.path(), &target)?;
            } else {
                trace!(file = %relative.display(), "copy");
                std::fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(entry.path(), e, "copy file"))?;
                copied += 1;
            }
        }

        debug!(files = copied, "Template copied");
        Ok(())
    }
}

/// Recreate the link itself; its target is not followed.
#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> QuickstartResult<()> {
    let link = std::fs::read_link(source).map_err(|e| map_io_error(source, e, "read link"))?;
    trace!(link = %source.display(), to = %link.display(), "symlink");
    std::os::unix::fs::symlink(&link, target)
        .map_err(|e| map_io_error(target, e, "create symlink"))?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, _target: &Path) -> QuickstartResult<()> {
    debug!(link = %source.display(), "Skipping symlink");
    Ok(())
}
