//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use tracing::trace;

use quickstart_core::{application::ports::Filesystem, error::QuickstartResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies the name.
        path.symlink_metadata().is_ok()
    }

    fn remove_file(&self, path: &Path) -> QuickstartResult<()> {
        trace!(path = %path.display(), "remove_file");
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> QuickstartResult<()> {
        trace!(from = %from.display(), to = %to.display(), "copy_file");
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn read_to_string(&self, path: &Path) -> QuickstartResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> QuickstartResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write_file");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

pub(crate) fn map_io_error(
    path: &Path,
    e: io::Error,
    operation: &str,
) -> quickstart_core::error::QuickstartError {
    use quickstart_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
