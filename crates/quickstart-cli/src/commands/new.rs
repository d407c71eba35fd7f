//! Creating a project: the default action when no subcommand is given.
//!
//! Responsibility: collect a `Selection` (flags, prompts, config defaults),
//! wire the adapters into a `ScaffoldService`, and render progress and the
//! final report. No pipeline logic lives here.

use std::io::{self, IsTerminal};
use std::path::Path;

use indicatif::ProgressBar;
use tracing::{debug, info, instrument};

use quickstart_adapters::{DirectoryFetcher, GitFetcher, LocalFilesystem, ProcessRunner};
use quickstart_core::{
    application::{
        ScaffoldObserver, ScaffoldReport, ScaffoldService, ScaffoldStep, USER_AGENT_ENV,
        ports::{StdioMode, TemplateFetcher},
    },
    domain::{
        DEFAULT_BRANCH, PackageManager, ProjectName, RemoteTemplate, Selection, TemplateCatalog,
        Variant,
    },
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, marker},
};

/// Create a project.
///
/// Dispatch sequence:
/// 1. Collect the selection (prompts only on a TTY without `--yes`)
/// 2. Pick the template source (`--template-dir` or configured remotes)
/// 3. Early-exit if `--dry-run`
/// 4. Run the pipeline, reporting each stage
/// 5. Print next-steps guidance
#[instrument(skip_all)]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let selection = if is_interactive(&args) {
        collect_interactive(&args, &config)?
    } else {
        collect_selection(&args, &config, None)?
    };
    debug!(%selection, "Selection resolved");

    let (fetcher, catalog) = template_source(&args, &config);
    let child_stdio = if global.quiet {
        StdioMode::Capture
    } else {
        StdioMode::Inherit
    };
    let service = ScaffoldService::new(
        fetcher,
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessRunner::new()),
    )
    .with_catalog(catalog)
    .with_child_stdio(child_stdio);

    let parent = std::env::current_dir()?;

    if args.dry_run {
        return dry_run(&service, &selection, &parent, &output);
    }

    info!(project = %selection.name(), "Scaffold started");
    let mut progress = Progress::new(&output, selection.name());
    let result = service.scaffold(&selection, &parent, &mut progress);
    progress.finish();
    let report = result?;

    report_completion(&report, &output)
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Source of answers for values missing from the command line.
trait Prompter {
    fn name(&mut self, default: &ProjectName) -> CliResult<ProjectName>;
    fn variant(&mut self, default: Variant) -> CliResult<Variant>;
    fn package_manager(&mut self, default: PackageManager) -> CliResult<PackageManager>;
}

fn is_interactive(args: &NewArgs) -> bool {
    cfg!(feature = "interactive")
        && !args.yes
        && io::stdin().is_terminal()
        && io::stdout().is_terminal()
}

#[cfg(feature = "interactive")]
fn collect_interactive(args: &NewArgs, config: &AppConfig) -> CliResult<Selection> {
    collect_selection(args, config, Some(&mut DialoguerPrompter))
}

#[cfg(not(feature = "interactive"))]
fn collect_interactive(args: &NewArgs, config: &AppConfig) -> CliResult<Selection> {
    collect_selection(args, config, None)
}

/// Flags win; then the prompter (if any) fills the gaps; then config
/// defaults.
fn collect_selection(
    args: &NewArgs,
    config: &AppConfig,
    mut prompter: Option<&mut dyn Prompter>,
) -> CliResult<Selection> {
    let defaults = &config.defaults;

    let name = match (&args.name, prompter.as_deref_mut()) {
        (Some(name), _) => ProjectName::from(name.as_str()),
        (None, Some(p)) => p.name(&defaults.name)?,
        (None, None) => defaults.name.clone(),
    };

    let variant = match (args.template, prompter.as_deref_mut()) {
        (Some(arg), _) => arg.into(),
        (None, Some(p)) => p.variant(defaults.template)?,
        (None, None) => defaults.template,
    };

    let package_manager = match (args.package_manager, prompter.as_deref_mut()) {
        (Some(arg), _) => arg.into(),
        (None, Some(p)) => p.package_manager(defaults.package_manager)?,
        (None, None) => defaults.package_manager,
    };

    Ok(Selection::builder()
        .name(name)
        .variant(variant)
        .package_manager(package_manager)
        .build())
}

#[cfg(feature = "interactive")]
struct DialoguerPrompter;

#[cfg(feature = "interactive")]
impl DialoguerPrompter {
    fn cancelled(e: dialoguer::Error) -> crate::error::CliError {
        debug!(error = %e, "Prompt aborted");
        crate::error::CliError::Cancelled
    }
}

#[cfg(feature = "interactive")]
impl Prompter for DialoguerPrompter {
    fn name(&mut self, default: &ProjectName) -> CliResult<ProjectName> {
        let name: String = dialoguer::Input::new()
            .with_prompt("Project name")
            .default(default.to_string())
            .interact_text()
            .map_err(Self::cancelled)?;
        Ok(ProjectName::from(name))
    }

    fn variant(&mut self, default: Variant) -> CliResult<Variant> {
        let titles: Vec<&str> = Variant::ALL.iter().map(|v| v.title()).collect();
        let index = dialoguer::Select::new()
            .with_prompt("Choose a template")
            .items(&titles)
            .default(Variant::ALL.iter().position(|v| *v == default).unwrap_or(0))
            .interact()
            .map_err(Self::cancelled)?;
        Ok(Variant::ALL.get(index).copied().unwrap_or(default))
    }

    fn package_manager(&mut self, default: PackageManager) -> CliResult<PackageManager> {
        let names: Vec<&str> = PackageManager::ALL.iter().map(|pm| pm.as_str()).collect();
        let index = dialoguer::Select::new()
            .with_prompt("Choose a package manager")
            .items(&names)
            .default(
                PackageManager::ALL
                    .iter()
                    .position(|pm| *pm == default)
                    .unwrap_or(0),
            )
            .interact()
            .map_err(Self::cancelled)?;
        Ok(PackageManager::ALL.get(index).copied().unwrap_or(default))
    }
}

// ── Template source ───────────────────────────────────────────────────────────

/// `--template-dir` copies one local tree for either variant; otherwise the
/// configured remotes are cloned.
fn template_source(
    args: &NewArgs,
    config: &AppConfig,
) -> (Box<dyn TemplateFetcher>, TemplateCatalog) {
    match &args.template_dir {
        Some(dir) => {
            let local = RemoteTemplate::new(dir.display().to_string(), DEFAULT_BRANCH);
            let catalog = TemplateCatalog::empty()
                .with(Variant::Ts, local.clone())
                .with(Variant::Js, local);
            (Box::new(DirectoryFetcher::new()), catalog)
        }
        None => (Box::new(GitFetcher::new()), config.templates.catalog()),
    }
}

// ── Dry run ───────────────────────────────────────────────────────────────────

fn dry_run(
    service: &ScaffoldService,
    selection: &Selection,
    parent: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let plan = service.plan(selection, parent)?;
    service.ensure_absent(&plan.project_dir)?;

    let removals: Vec<String> = plan
        .cleanup
        .entries()
        .iter()
        .map(|e| e.path.display().to_string())
        .collect();
    let pm = selection.package_manager();

    output.info("Dry run: nothing will be written")?;
    output.print(&format!("  Project:   {}", selection.name()))?;
    output.print(&format!("  Location:  {}", plan.project_dir.display()))?;
    output.print(&format!("  Template:  {}", plan.template))?;
    output.print(&format!("  Remove:    {}", removals.join(", ")))?;
    output.print(&format!(
        "  Install:   {} ({USER_AGENT_ENV}={pm})",
        plan.install
    ))?;
    output.print(&format!("  Init:      {}", plan.init))?;
    output.print(&format!(
        "  Then:      cd {} && {}",
        selection.name(),
        plan.dev
    ))?;
    Ok(())
}

// ── Progress & report ─────────────────────────────────────────────────────────

/// Prints a marker line per stage and spins while cloning.
struct Progress<'a> {
    output: &'a OutputManager,
    project: String,
    spinner: Option<ProgressBar>,
}

impl<'a> Progress<'a> {
    fn new(output: &'a OutputManager, project: &ProjectName) -> Self {
        Self {
            output,
            project: project.to_string(),
            spinner: None,
        }
    }

    fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn emit(result: io::Result<()>) {
        if let Err(e) = result {
            debug!(error = %e, "Failed to write progress");
        }
    }
}

impl ScaffoldObserver for Progress<'_> {
    fn on_step(&mut self, step: &ScaffoldStep) {
        self.finish();
        match step {
            ScaffoldStep::Fetching { template } => {
                Self::emit(self.output.step(
                    marker::CLONE,
                    &format!("Cloning \"{template}\" into \"{}\"...", self.project),
                ));
                self.spinner = Some(self.output.spinner("Cloning..."));
            }
            ScaffoldStep::Normalizing => {
                Self::emit(self.output.step(marker::INIT, "Initializing project..."));
            }
            ScaffoldStep::Installing { command } => {
                debug!(%command, "Installing");
                Self::emit(self.output.step(
                    marker::INSTALL,
                    "Installing dependencies, it may take some time...",
                ));
            }
            ScaffoldStep::Initializing { command } => {
                Self::emit(
                    self.output
                        .step(marker::INIT, &format!("Running `{command}`...")),
                );
            }
        }
    }

    fn on_warning(&mut self, message: &str) {
        Self::emit(self.output.warning(message));
    }
}

fn report_completion(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    info!(
        project = %report.project_dir.display(),
        removed = report.removed.len(),
        env_file = report.env_file_created,
        "Scaffold completed"
    );
    if report.env_file_created {
        output.success("Created .env.local")?;
    }
    if let Some(field) = &report.package_manager_field {
        output.success(&format!("Set packageManager to {field}"))?;
    }

    output.print("")?;
    output.step(marker::READY, "Project ready!")?;
    output.step(marker::NEXT, &report.next_steps())?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
