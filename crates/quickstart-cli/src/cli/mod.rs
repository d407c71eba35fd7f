//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use quickstart_core::domain::{PackageManager, Variant};

pub mod global;
pub use global::GlobalArgs;

/// Binary name used in help text and completion scripts.
pub const BIN_NAME: &str = "create-vueless";

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand the tool creates a project; the project flags are
/// flattened into the top level so `create-vueless demo -p pnpm` works.
#[derive(Debug, Parser)]
#[command(
    name     = BIN_NAME,
    bin_name = BIN_NAME,
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2728} Create a new Vueless project",
    long_about = "Clones the official Vueless quickstart template, strips the files \
                  of the variant and package managers you did not pick, installs \
                  dependencies and runs `vueless init`.",
    after_help = "EXAMPLES:\n\
        \x20 create-vueless\n\
        \x20 create-vueless my-app --template ts --pm pnpm\n\
        \x20 create-vueless my-app -t js -p yarn --yes\n\
        \x20 create-vueless my-app --dry-run\n\
        \x20 create-vueless completions bash > ~/.local/share/bash-completion/completions/create-vueless",
    subcommand_precedence_over_arg = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project options used when no subcommand is given.
    #[command(flatten)]
    pub new: NewArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List templates and package managers.
    #[command(
        visible_alias = "ls",
        about = "List templates and package managers",
        after_help = "EXAMPLES:\n\
            \x20 create-vueless list\n\
            \x20 create-vueless -c ./offline.toml list"
    )]
    List,

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 create-vueless init\n\
            \x20 create-vueless init --force\n\
            \x20 create-vueless -c ./create-vueless.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 create-vueless completions bash > ~/.local/share/bash-completion/completions/create-vueless\n\
            \x20 create-vueless completions zsh  > ~/.zfunc/_create-vueless\n\
            \x20 create-vueless completions fish > ~/.config/fish/completions/create-vueless.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 create-vueless config get defaults.package_manager\n\
            \x20 create-vueless config list\n\
            \x20 create-vueless config path"
    )]
    Config(ConfigCommands),
}

// ── new (default) ─────────────────────────────────────────────────────────────

/// Options for creating a project.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Project directory name, created inside the current directory.
    #[arg(value_name = "NAME", help = "Project name (prompted when omitted)")]
    pub name: Option<String>,

    #[arg(
        short = 't',
        long = "template",
        value_name = "VARIANT",
        value_enum,
        help = "Template variant"
    )]
    pub template: Option<TemplateArg>,

    #[arg(
        short = 'p',
        long = "pm",
        value_name = "MANAGER",
        value_enum,
        help = "Package manager"
    )]
    pub package_manager: Option<PackageManagerArg>,

    /// Never prompt; missing values come from configuration defaults.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use defaults")]
    pub yes: bool,

    /// Preview what would happen without touching the filesystem.
    #[arg(long = "dry-run", help = "Show what would be done without doing it")]
    pub dry_run: bool,

    /// Copy the template from a local directory instead of cloning it.
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        help = "Use a local template directory (offline)"
    )]
    pub template_dir: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.template`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Template variant as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateArg {
    #[value(alias = "typescript")]
    Ts,
    #[value(alias = "javascript")]
    Js,
}

impl From<TemplateArg> for Variant {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Ts => Variant::Ts,
            TemplateArg::Js => Variant::Js,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManagerArg {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
            PackageManagerArg::Pnpm => PackageManager::Pnpm,
            PackageManagerArg::Bun => PackageManager::Bun,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_creates_with_prompts() {
        let cli = Cli::parse_from([BIN_NAME]);
        assert!(cli.command.is_none());
        assert!(cli.new.name.is_none());
        assert!(!cli.new.yes);
    }

    #[test]
    fn positional_name_and_flags() {
        let cli = Cli::parse_from([BIN_NAME, "demo", "-t", "ts", "--pm", "pnpm", "-y"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.new.name.as_deref(), Some("demo"));
        assert_eq!(cli.new.template, Some(TemplateArg::Ts));
        assert_eq!(cli.new.package_manager, Some(PackageManagerArg::Pnpm));
        assert!(cli.new.yes);
    }

    #[test]
    fn long_variant_names_are_aliases() {
        let cli = Cli::parse_from([BIN_NAME, "demo", "--template", "javascript"]);
        assert_eq!(cli.new.template.map(Variant::from), Some(Variant::Js));
    }

    #[test]
    fn unknown_package_manager_is_rejected() {
        assert!(Cli::try_parse_from([BIN_NAME, "demo", "--pm", "deno"]).is_err());
    }

    #[test]
    fn subcommand_wins_over_project_name() {
        let cli = Cli::parse_from([BIN_NAME, "list"]);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn global_flags_precede_subcommands() {
        let cli = Cli::parse_from([BIN_NAME, "-v", "-c", "cfg.toml", "config", "path"]);
        assert_eq!(cli.global.verbose, 1);
        assert!(matches!(cli.command, Some(Commands::Config(ConfigCommands::Path))));
    }

    #[test]
    fn config_get_takes_a_key() {
        let cli = Cli::parse_from([BIN_NAME, "config", "get", "defaults.template"]);
        match cli.command {
            Some(Commands::Config(ConfigCommands::Get { key })) => {
                assert_eq!(key, "defaults.template")
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from([BIN_NAME, "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn package_manager_conversion_covers_all() {
        let all: Vec<PackageManager> = PackageManagerArg::value_variants()
            .iter()
            .map(|a| PackageManager::from(*a))
            .collect();
        assert_eq!(all, PackageManager::ALL);
    }
}
