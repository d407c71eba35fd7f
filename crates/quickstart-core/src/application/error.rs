//! Application layer errors.
//!
//! These errors represent failures in orchestration: the guard, the clone,
//! filesystem cleanup and child processes. Selection and catalog errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the scaffold pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target directory (or a file with that name) is already there.
    #[error("Directory \"{}\" already exists", .path.display())]
    ProjectExists { path: PathBuf },

    /// Cloning the template repository failed.
    #[error("Failed to fetch template {template}: {reason}")]
    FetchFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A child process could not be started at all.
    #[error("Could not run `{command}`: {reason}")]
    CommandUnavailable { command: String, reason: String },

    /// A child process ran and exited unsuccessfully.
    #[error("`{command}` failed with {}", describe_exit(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// Shared adapter state is unusable (poisoned lock).
    #[error("Adapter state is poisoned")]
    LockPoisoned,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::FetchFailed { .. } => vec![
                "Check your network connection".into(),
                "The templates are cloned over SSH: make sure `ssh -T git@github.com` works".into(),
                "Ensure `git` is installed and in your PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandUnavailable { command, .. } => vec![
                format!("Ensure the program behind `{command}` is installed and in your PATH"),
            ],
            Self::CommandFailed { stderr, .. } => {
                let mut out = vec!["Check the command output above for details".into()];
                if let Some(stderr) = stderr.as_deref().filter(|s| !s.trim().is_empty()) {
                    out.push(format!("stderr: {}", stderr.trim()));
                }
                out.push("The partially created project was left in place; remove it before retrying".into());
                out
            }
            Self::LockPoisoned => vec!["This is likely a bug".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
            Self::FetchFailed { .. } => ErrorCategory::External,
            Self::CommandUnavailable { .. } | Self::CommandFailed { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }

    /// Exit status of the failed child process, if that is what failed.
    pub fn child_exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}
