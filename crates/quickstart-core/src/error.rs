//! Unified error handling for the quickstart core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for quickstart-core operations.
#[derive(Debug, Error, Clone)]
pub enum QuickstartError {
    /// Errors from the domain layer (unknown variant, broken catalog).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (pipeline failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl QuickstartError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Exit status of a failed child process, when one caused this error.
    pub fn child_exit_code(&self) -> Option<i32> {
        match self {
            Self::Application(e) => e.child_exit_code(),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    /// The target directory already exists.
    Conflict,
    NotFound,
    /// Git or a package manager failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type QuickstartResult<T> = Result<T, QuickstartError>;
