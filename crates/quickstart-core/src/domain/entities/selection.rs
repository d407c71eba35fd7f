//! The `Selection` aggregate and its builder.
//!
//! A `Selection` is what the user asked for: project name, template variant
//! and package manager. It is immutable once built; every field the caller
//! leaves unset falls back to its default (`vueless-quickstart`, `ts`, `npm`).
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::{PackageManager, ProjectName, Variant};

/// A complete scaffolding request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    name: ProjectName,
    variant: Variant,
    package_manager: PackageManager,
}

impl Selection {
    pub fn new(
        name: impl Into<ProjectName>,
        variant: Variant,
        package_manager: PackageManager,
    ) -> Self {
        Self {
            name: name.into(),
            variant,
            package_manager,
        }
    }

    /// Start building a `Selection` from partial input.
    pub fn builder() -> SelectionBuilder {
        SelectionBuilder::default()
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }
    pub const fn variant(&self) -> Variant {
        self.variant
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    /// Directory the project is created in: `parent` joined with the name.
    ///
    /// A rooted name (`/tmp/x`) stays under `parent`; an empty name
    /// is `parent` itself.
    pub fn target_dir(&self, parent: &Path) -> PathBuf {
        let mut dir = parent.to_path_buf();
        for component in Path::new(self.name.as_str()).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {}
                other => dir.push(other),
            }
        }
        dir
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} + {})",
            self.name,
            self.variant.title(),
            self.package_manager
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`Selection`]; unset fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct SelectionBuilder {
    name: Option<ProjectName>,
    variant: Option<Variant>,
    package_manager: Option<PackageManager>,
}

impl SelectionBuilder {
    pub fn name(mut self, name: impl Into<ProjectName>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn package_manager(mut self, pm: PackageManager) -> Self {
        self.package_manager = Some(pm);
        self
    }

    pub fn build(self) -> Selection {
        Selection {
            name: self.name.unwrap_or_default(),
            variant: self.variant.unwrap_or_default(),
            package_manager: self.package_manager.unwrap_or_default(),
        }
    }
}
