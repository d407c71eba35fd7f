use std::path::PathBuf;

use crate::domain::{
    entities::selection::Selection,
    value_objects::{PackageManager, Variant},
};

/// Why a file is scheduled for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupReason {
    /// Config file of a variant the user did not pick.
    UnusedVariantConfig(Variant),
    /// Lockfile of a package manager the user did not pick.
    ForeignLockfile(PackageManager),
}

/// One file to delete, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupEntry {
    pub path: PathBuf,
    pub reason: CleanupReason,
}

/// Scaffold-only files to strip from a freshly cloned template.
///
/// Pure data: applying it is the pipeline's job. Entries for the selected
/// variant and package manager are never produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    pub(crate) entries: Vec<CleanupEntry>,
}

impl CleanupPlan {
    pub fn for_selection(selection: &Selection) -> Self {
        let configs = Variant::ALL
            .into_iter()
            .filter(|v| *v != selection.variant())
            .map(|v| CleanupEntry {
                path: PathBuf::from(v.config_file()),
                reason: CleanupReason::UnusedVariantConfig(v),
            });

        let lockfiles = PackageManager::ALL
            .into_iter()
            .filter(|pm| *pm != selection.package_manager())
            .map(|pm| CleanupEntry {
                path: PathBuf::from(pm.lockfile()),
                reason: CleanupReason::ForeignLockfile(pm),
            });

        Self {
            entries: configs.chain(lockfiles).collect(),
        }
    }

    pub fn entries(&self) -> &[CleanupEntry] {
        &self.entries
    }
}
