//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from the outside world.
//! The `quickstart-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{CommandLine, RemoteTemplate};
use crate::error::QuickstartResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `quickstart_adapters::filesystem::LocalFilesystem` (production)
/// - `quickstart_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Delete a single file.
    fn remove_file(&self, path: &Path) -> QuickstartResult<()>;

    /// Copy `from` to `to` byte for byte, replacing `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> QuickstartResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> QuickstartResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> QuickstartResult<()>;
}

/// Port for materialising a remote template.
///
/// Implemented by:
/// - `quickstart_adapters::fetcher::GitFetcher` (shallow clone, history dropped)
/// - `quickstart_adapters::fetcher::DirectoryFetcher` (local tree copy)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    /// Populate `destination` with the template's file tree, without any
    /// version-control metadata. `destination` must not exist beforehand.
    fn fetch(&self, template: &RemoteTemplate, destination: &Path) -> QuickstartResult<()>;
}

/// Port for running child processes to completion.
///
/// Implemented by `quickstart_adapters::runner::ProcessRunner`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` and block until it exits.
    ///
    /// Returns `Err` only when the process cannot be started; a non-zero
    /// exit is reported through [`CommandOutput::code`].
    fn run(&self, spec: &CommandSpec) -> QuickstartResult<CommandOutput>;
}

// ── Command types ─────────────────────────────────────────────────────────────

/// What happens to a child's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Child writes straight to our terminal.
    #[default]
    Inherit,
    /// Output is collected into [`CommandOutput`].
    Capture,
}

/// A command bound to a working directory and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: CommandLine,
    pub cwd: PathBuf,
    /// Added on top of the inherited environment.
    pub env: Vec<(String, String)>,
    pub stdio: StdioMode,
}

impl CommandSpec {
    pub fn new(command: CommandLine, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command,
            cwd: cwd.into(),
            env: Vec::new(),
            stdio: StdioMode::Inherit,
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn stdio(mut self, stdio: StdioMode) -> Self {
        self.stdio = stdio;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.command.fmt(f)
    }
}

/// Result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Empty unless captured.
    pub stdout: String,
    /// Empty unless captured.
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}
