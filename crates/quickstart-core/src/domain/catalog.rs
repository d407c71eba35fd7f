//! Lookup tables: which remote template backs each variant, and which
//! commands each package manager runs.
//!
//! Both tables are plain values handed to the pipeline at construction time.
//! Nothing here is global or mutable, so tests and configuration can swap
//! in their own entries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{PackageManager, Variant},
};

/// Branch every official quickstart template is cloned from.
pub const DEFAULT_BRANCH: &str = "main";

// ── RemoteTemplate ───────────────────────────────────────────────────────────

/// A git repository and branch holding a starter project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTemplate {
    pub url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

impl RemoteTemplate {
    pub fn new(url: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: branch.into(),
        }
    }

    /// `url#branch`, the form shown to users.
    pub fn spec(&self) -> String {
        format!("{}#{}", self.url, self.branch)
    }

    fn validate(&self, variant: Variant) -> Result<(), DomainError> {
        let reason = if self.url.trim().is_empty() {
            "url is empty"
        } else if self.branch.trim().is_empty() {
            "branch is empty"
        } else {
            return Ok(());
        };
        Err(DomainError::InvalidTemplateRef {
            variant: variant.to_string(),
            reason: reason.into(),
        })
    }
}

impl fmt::Display for RemoteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec())
    }
}

// ── TemplateCatalog ──────────────────────────────────────────────────────────

/// Variant → remote template mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    entries: BTreeMap<Variant, RemoteTemplate>,
}

impl TemplateCatalog {
    /// An empty catalog; every lookup fails until entries are added.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The two official Vueless quickstart repositories.
    pub fn official() -> Self {
        Self::empty()
            .with(
                Variant::Ts,
                RemoteTemplate::new(
                    "git@github.com:vuelessjs/vueless-quickstart-ts.git",
                    DEFAULT_BRANCH,
                ),
            )
            .with(
                Variant::Js,
                RemoteTemplate::new(
                    "git@github.com:vuelessjs/vueless-quickstart.git",
                    DEFAULT_BRANCH,
                ),
            )
    }

    /// Insert or replace the template for `variant`.
    pub fn with(mut self, variant: Variant, template: RemoteTemplate) -> Self {
        self.entries.insert(variant, template);
        self
    }

    /// Resolve the template for `variant`.
    pub fn resolve(&self, variant: Variant) -> Result<&RemoteTemplate, DomainError> {
        let template = self
            .entries
            .get(&variant)
            .ok_or_else(|| DomainError::MissingTemplate(variant.to_string()))?;
        template.validate(variant)?;
        Ok(template)
    }

    /// All registered entries in prompt order.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &RemoteTemplate)> {
        self.entries.iter().map(|(v, t)| (*v, t))
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::official()
    }
}

// ── CommandLine ──────────────────────────────────────────────────────────────

/// A program plus its arguments, not yet bound to a directory or environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ── ManagerCommands ──────────────────────────────────────────────────────────

/// Per-package-manager command table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerCommands {
    init_package: String,
}

impl ManagerCommands {
    /// Commands for the `vueless` init package.
    pub fn new(init_package: impl Into<String>) -> Self {
        Self {
            init_package: init_package.into(),
        }
    }

    /// `<pm> install`
    pub fn install(&self, pm: PackageManager) -> CommandLine {
        CommandLine::new(pm.as_str(), ["install"])
    }

    /// One-time project setup, run through `npx` with a manager hint.
    pub fn init(&self, pm: PackageManager) -> CommandLine {
        let mut args = vec![self.init_package.clone(), "init".to_string()];
        match pm {
            PackageManager::Yarn => args.push("--yarn".into()),
            PackageManager::Pnpm => args.push("--pnpm".into()),
            PackageManager::Npm | PackageManager::Bun => {}
        }
        CommandLine::new("npx", args)
    }

    /// `<pm> --version`
    pub fn version(&self, pm: PackageManager) -> CommandLine {
        CommandLine::new(pm.as_str(), ["--version"])
    }

    /// `<pm> run dev`, printed in the next-steps hint.
    pub fn dev(&self, pm: PackageManager) -> CommandLine {
        CommandLine::new(pm.as_str(), ["run", "dev"])
    }
}

impl Default for ManagerCommands {
    fn default() -> Self {
        Self::new("vueless")
    }
}
