//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use quickstart_core::{
    application::{ApplicationError, ports::Filesystem},
    error::QuickstartResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can hand one clone to the
/// pipeline and inspect another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Create a directory and all its parents (testing helper).
    pub fn create_dir_all(&self, path: &Path) -> QuickstartResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::LockPoisoned)?;
        inner.add_ancestors(path);
        Ok(())
    }

    /// Store a file, creating its parents (testing helper).
    pub fn insert_file(&self, path: &Path, content: impl Into<Vec<u8>>) -> QuickstartResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::LockPoisoned)?;
        if let Some(parent) = path.parent() {
            inner.add_ancestors(parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
        Ok(())
    }

    /// Read a file's raw content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path) -> quickstart_core::error::QuickstartError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> QuickstartResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::LockPoisoned)?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> QuickstartResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::LockPoisoned)?;
        let content = inner.files.get(from).cloned().ok_or_else(|| not_found(from))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> QuickstartResult<String> {
        let bytes = self.read_file(path).ok_or_else(|| not_found(path))?;
        String::from_utf8(bytes).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Not valid UTF-8: {e}"),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> QuickstartResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::LockPoisoned)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }
}
