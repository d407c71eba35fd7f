//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the catalog built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CREATE_VUELESS__DEFAULTS__PACKAGE_MANAGER=pnpm`
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quickstart_core::domain::{
    DEFAULT_BRANCH, PackageManager, ProjectName, RemoteTemplate, TemplateCatalog, Variant,
};

/// Prefix of environment overrides; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "CREATE_VUELESS";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Answers used when a value is neither passed nor prompted.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Remote template per variant.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    pub name: ProjectName,
    pub template: Variant,
    pub package_manager: PackageManager,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub ts: RemoteTemplate,
    pub js: RemoteTemplate,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        let official = TemplateCatalog::official();
        let pick = |variant| {
            official
                .resolve(variant)
                .cloned()
                .unwrap_or_else(|_| RemoteTemplate::new("", DEFAULT_BRANCH))
        };
        Self {
            ts: pick(Variant::Ts),
            js: pick(Variant::Js),
        }
    }
}

impl TemplateConfig {
    /// Catalog handed to the scaffold service.
    pub fn catalog(&self) -> TemplateCatalog {
        TemplateCatalog::empty()
            .with(Variant::Ts, self.ts.clone())
            .with(Variant::Js, self.js.clone())
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialise built-in defaults")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.create-vueless.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "vueless", "create-vueless")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".create-vueless.toml"))
    }

    /// Path in effect for this invocation.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Look up a single value by dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "defaults.name" => self.defaults.name.to_string(),
            "defaults.template" => self.defaults.template.to_string(),
            "defaults.package_manager" => self.defaults.package_manager.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "templates.ts.url" => self.templates.ts.url.clone(),
            "templates.ts.branch" => self.templates.ts.branch.clone(),
            "templates.js.url" => self.templates.js.url.clone(),
            "templates.js.branch" => self.templates.js.branch.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key accepted by [`Self::get`].
    pub const KEYS: [&'static str; 8] = [
        "defaults.name",
        "defaults.template",
        "defaults.package_manager",
        "output.no_color",
        "templates.ts.url",
        "templates.ts.branch",
        "templates.js.url",
        "templates.js.branch",
    ];
}
