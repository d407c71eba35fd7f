//! Domain value objects: Variant, PackageManager, ProjectName.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! hold NO command or URL knowledge; that lives in `catalog.rs`. This file's
//! only job is to define the types, their string representations, and their
//! `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Variant ──────────────────────────────────────────────────────────────────

/// Starter template flavour.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Ts,
    Js,
}

impl Variant {
    /// Prompt order; the first entry is the default choice.
    pub const ALL: [Variant; 2] = [Variant::Ts, Variant::Js];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Js => "js",
        }
    }

    /// Human readable title used in prompts and listings.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Ts => "TypeScript",
            Self::Js => "JavaScript",
        }
    }

    /// The Vueless config file shipped by this variant's template.
    pub const fn config_file(&self) -> &'static str {
        match self {
            Self::Ts => "vueless.config.ts",
            Self::Js => "vueless.config.js",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ts" | "typescript" => Ok(Self::Ts),
            "js" | "javascript" => Ok(Self::Js),
            other => Err(DomainError::UnknownVariant(other.to_string())),
        }
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

/// One of the four supported JavaScript package managers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Prompt order; the first entry is the default choice.
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    /// Executable name, also used as the display form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Lockfile this manager writes at the project root.
    pub const fn lockfile(&self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
            Self::Bun => "bun.lockb",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            "bun" => Ok(Self::Bun),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Name of the directory the project is created in.
///
/// Any string is accepted. An existing path is rejected later by the
/// directory guard, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub const DEFAULT: &'static str = "vueless-quickstart";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProjectName {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProjectName {
    fn from(value: String) -> Self {
        Self(value)
    }
}
