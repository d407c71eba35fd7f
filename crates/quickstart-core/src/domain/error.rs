// ============================================================================
// domain/error.rs - selection and catalog errors
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("unknown template variant '{0}'")]
    UnknownVariant(String),

    #[error("unknown package manager '{0}'")]
    UnknownPackageManager(String),

    #[error("template reference for '{variant}' is invalid: {reason}")]
    InvalidTemplateRef { variant: String, reason: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("no template registered for variant '{0}'")]
    MissingTemplate(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownVariant(value) => vec![
                format!("'{value}' is not a known template"),
                "Supported templates: ts (TypeScript), js (JavaScript)".into(),
            ],
            Self::UnknownPackageManager(value) => vec![
                format!("'{value}' is not a supported package manager"),
                "Supported package managers: npm, yarn, pnpm, bun".into(),
            ],
            Self::InvalidTemplateRef { variant, .. } => vec![
                format!("Check the [templates.{variant}] section of your config file"),
                "Both `url` and `branch` must be non-empty".into(),
            ],
            Self::MissingTemplate(variant) => vec![
                format!("Add a [templates.{variant}] entry to your config file"),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownVariant(_) | Self::UnknownPackageManager(_) => ErrorCategory::Validation,
            Self::InvalidTemplateRef { .. } => ErrorCategory::Validation,
            Self::MissingTemplate(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
