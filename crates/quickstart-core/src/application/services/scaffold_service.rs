//! Scaffold Service - main application orchestrator.
//!
//! This service runs the whole project creation pipeline, strictly in order:
//! 1. Refuse an existing target directory
//! 2. Fetch the template (history-free clone)
//! 3. Strip scaffold-only files of the unselected variant and managers
//! 4. Install dependencies with the selected package manager
//! 5. Run the Vueless init command, create `.env.local`, record the manager
//!    version in `package.json`
//!
//! No step is retried and nothing is rolled back: once the guard has passed,
//! a failure leaves the partially created project on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec, Filesystem, StdioMode, TemplateFetcher},
    },
    domain::{
        CleanupPlan, CommandLine, ManagerCommands, PackageManager, RemoteTemplate, Selection,
        TemplateCatalog,
    },
    error::{QuickstartError, QuickstartResult},
};

/// Variable that tells tooling inside the project which manager is in charge.
/// Only the install child process receives it.
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";
/// Example environment file shipped by the templates.
pub const ENV_EXAMPLE_FILE: &str = ".env.local.example";
/// Git-ignored local environment file created from the example.
pub const ENV_LOCAL_FILE: &str = ".env.local";
/// Manifest that receives the `packageManager` field.
pub const MANIFEST_FILE: &str = "package.json";

// ── Progress reporting ────────────────────────────────────────────────────────

/// Pipeline stage announcements, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldStep {
    Fetching { template: String },
    Normalizing,
    Installing { command: String },
    Initializing { command: String },
}

/// Receives progress from [`ScaffoldService::scaffold`].
///
/// Both methods default to doing nothing.
pub trait ScaffoldObserver {
    fn on_step(&mut self, _step: &ScaffoldStep) {}
    fn on_warning(&mut self, _message: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScaffoldObserver for NoopObserver {}

// ── Plan & report ─────────────────────────────────────────────────────────────

/// Everything the pipeline would do for a selection, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub selection: Selection,
    pub project_dir: PathBuf,
    pub template: RemoteTemplate,
    pub cleanup: CleanupPlan,
    pub install: CommandLine,
    pub init: CommandLine,
    pub dev: CommandLine,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub selection: Selection,
    pub project_dir: PathBuf,
    /// Files deleted during normalisation, relative to the project root.
    pub removed: Vec<PathBuf>,
    pub env_file_created: bool,
    /// Value written to `packageManager`, if any.
    pub package_manager_field: Option<String>,
    pub warnings: Vec<String>,
    /// Shell command that starts the dev server, e.g. `pnpm run dev`.
    pub dev_command: CommandLine,
}

impl ScaffoldReport {
    /// `cd <project> && <pm> run dev`
    pub fn next_steps(&self) -> String {
        format!("cd {} && {}", self.selection.name(), self.dev_command)
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Main scaffolding service.
///
/// Lookup tables (template catalog, manager commands) are owned values so
/// callers can substitute them; they default to the official ones.
pub struct ScaffoldService {
    fetcher: Box<dyn TemplateFetcher>,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    catalog: TemplateCatalog,
    commands: ManagerCommands,
    child_stdio: StdioMode,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        fetcher: Box<dyn TemplateFetcher>,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            fetcher,
            filesystem,
            runner,
            catalog: TemplateCatalog::official(),
            commands: ManagerCommands::default(),
            child_stdio: StdioMode::Inherit,
        }
    }

    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// How install and init output is handled. Version detection always
    /// captures.
    pub fn with_child_stdio(mut self, stdio: StdioMode) -> Self {
        self.child_stdio = stdio;
        self
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Resolve everything the run would do, without side effects.
    pub fn plan(&self, selection: &Selection, parent: &Path) -> QuickstartResult<ScaffoldPlan> {
        let pm = selection.package_manager();
        Ok(ScaffoldPlan {
            selection: selection.clone(),
            project_dir: selection.target_dir(parent),
            template: self.catalog.resolve(selection.variant())?.clone(),
            cleanup: CleanupPlan::for_selection(selection),
            install: self.commands.install(pm),
            init: self.commands.init(pm),
            dev: self.commands.dev(pm),
        })
    }

    /// Fail if anything already lives at `path`.
    pub fn ensure_absent(&self, path: &Path) -> QuickstartResult<()> {
        if self.filesystem.exists(path) {
            return Err(ApplicationError::ProjectExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    /// Create a project for `selection` inside `parent`.
    #[instrument(
        skip_all,
        fields(
            project = %selection.name(),
            variant = %selection.variant(),
            pm = %selection.package_manager(),
        )
    )]
    pub fn scaffold(
        &self,
        selection: &Selection,
        parent: &Path,
        observer: &mut dyn ScaffoldObserver,
    ) -> QuickstartResult<ScaffoldReport> {
        let plan = self.plan(selection, parent)?;
        let dir = plan.project_dir.as_path();

        // 1. Guard: nothing may be written before this check.
        self.ensure_absent(dir)?;

        // 2. Fetch
        observer.on_step(&ScaffoldStep::Fetching {
            template: plan.template.spec(),
        });
        info!(template = %plan.template, dest = %dir.display(), "Fetching template");
        self.fetcher.fetch(&plan.template, dir)?;

        let mut report = ScaffoldReport {
            selection: selection.clone(),
            project_dir: dir.to_path_buf(),
            removed: Vec::new(),
            env_file_created: false,
            package_manager_field: None,
            warnings: Vec::new(),
            dev_command: plan.dev.clone(),
        };

        // 3. Normalise
        observer.on_step(&ScaffoldStep::Normalizing);
        report.removed = self.normalize(dir, &plan.cleanup)?;

        // 4. Install
        let pm = selection.package_manager();
        observer.on_step(&ScaffoldStep::Installing {
            command: plan.install.to_string(),
        });
        let install = CommandSpec::new(plan.install.clone(), dir)
            .env(USER_AGENT_ENV, pm.as_str())
            .stdio(self.child_stdio);
        self.run_checked(&install)?;

        // 5. Initialise
        observer.on_step(&ScaffoldStep::Initializing {
            command: plan.init.to_string(),
        });
        let init = CommandSpec::new(plan.init.clone(), dir).stdio(self.child_stdio);
        self.run_checked(&init)?;

        report.env_file_created = self.create_env_file(dir)?;

        match self.annotate_manifest(dir, pm) {
            Ok(field) => report.package_manager_field = Some(field),
            Err(reason) => {
                warn!(%reason, "Skipping packageManager field");
                let message = format!("Could not detect {pm} version, skipping packageManager field");
                observer.on_warning(&message);
                report.warnings.push(message);
            }
        }

        info!(
            removed = report.removed.len(),
            env_file = report.env_file_created,
            "Scaffold completed successfully"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Delete every planned file that exists; absent files are skipped.
    fn normalize(&self, dir: &Path, plan: &CleanupPlan) -> QuickstartResult<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for entry in plan.entries() {
            let path = dir.join(&entry.path);
            if !self.filesystem.exists(&path) {
                continue;
            }
            debug!(path = %path.display(), reason = ?entry.reason, "Removing scaffold-only file");
            self.filesystem.remove_file(&path)?;
            removed.push(entry.path.clone());
        }
        Ok(removed)
    }

    /// Run a command and turn a non-zero exit into an error.
    fn run_checked(&self, spec: &CommandSpec) -> QuickstartResult<CommandOutput> {
        info!(command = %spec, cwd = %spec.cwd.display(), "Running command");
        let output = self.runner.run(spec)?;
        if !output.is_success() {
            let stderr = (!output.stderr.is_empty()).then(|| output.stderr.clone());
            return Err(ApplicationError::CommandFailed {
                command: spec.to_string(),
                code: output.code,
                stderr,
            }
            .into());
        }
        Ok(output)
    }

    /// Copy `.env.local.example` to `.env.local` when the example exists.
    fn create_env_file(&self, dir: &Path) -> QuickstartResult<bool> {
        let example = dir.join(ENV_EXAMPLE_FILE);
        if !self.filesystem.exists(&example) {
            debug!("No {ENV_EXAMPLE_FILE} in template");
            return Ok(false);
        }
        self.filesystem
            .copy_file(&example, &dir.join(ENV_LOCAL_FILE))?;
        Ok(true)
    }

    /// Best effort: set `packageManager` to `<pm>@<version>`.
    ///
    /// Every failure comes back as a reason string for the caller to warn
    /// about; none of them abort the run.
    fn annotate_manifest(&self, dir: &Path, pm: PackageManager) -> Result<String, String> {
        let version = self.detect_version(dir, pm)?;
        let field = format!("{pm}@{version}");

        let path = dir.join(MANIFEST_FILE);
        let raw = self
            .filesystem
            .read_to_string(&path)
            .map_err(|e| e.to_string())?;
        let updated = set_package_manager(&raw, &field)?;
        self.filesystem
            .write_file(&path, &updated)
            .map_err(|e| e.to_string())?;

        debug!(%field, "Recorded packageManager");
        Ok(field)
    }

    fn detect_version(&self, dir: &Path, pm: PackageManager) -> Result<String, String> {
        let spec = CommandSpec::new(self.commands.version(pm), dir).stdio(StdioMode::Capture);
        let output = self
            .runner
            .run(&spec)
            .map_err(|e: QuickstartError| e.to_string())?;
        if !output.is_success() {
            return Err(format!("`{spec}` exited with {:?}", output.code));
        }
        output
            .stdout
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
            .ok_or_else(|| format!("`{spec}` printed nothing"))
    }
}

/// Insert or replace `packageManager` in a manifest, keeping key order and
/// 2-space indentation.
fn set_package_manager(raw: &str, field: &str) -> Result<String, String> {
    let mut manifest: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("invalid {MANIFEST_FILE}: {e}"))?;
    let object = manifest
        .as_object_mut()
        .ok_or_else(|| format!("{MANIFEST_FILE} is not a JSON object"))?;
    object.insert(
        "packageManager".to_string(),
        serde_json::Value::String(field.to_string()),
    );
    let mut out = serde_json::to_string_pretty(&manifest).map_err(|e| e.to_string())?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::output::{MockCommandRunner, MockFilesystem, MockTemplateFetcher};
    use crate::domain::Variant;

    const PARENT: &str = "/work";

    fn demo() -> Selection {
        Selection::new("demo", Variant::Ts, PackageManager::Pnpm)
    }

    fn project(rel: &str) -> PathBuf {
        Path::new(PARENT).join("demo").join(rel)
    }

    /// A filesystem whose `exists` answers from a fixed set.
    fn fs_with(present: &[PathBuf]) -> MockFilesystem {
        let present: HashSet<PathBuf> = present.iter().cloned().collect();
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(move |p| present.contains(p));
        fs
    }

    fn ok_fetcher() -> MockTemplateFetcher {
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().times(1).returning(|_, _| Ok(()));
        fetcher
    }

    fn recording_runner(
        calls: Arc<Mutex<Vec<CommandSpec>>>,
        respond: impl Fn(&CommandSpec) -> CommandOutput + Send + Sync + 'static,
    ) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(move |spec| {
            calls.lock().unwrap().push(spec.clone());
            Ok(respond(spec))
        });
        runner
    }

    #[test]
    fn existing_directory_aborts_before_any_side_effect() {
        let fs = fs_with(&[PathBuf::from("/work/demo")]);
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().times(0);
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let service = ScaffoldService::new(Box::new(fetcher), Box::new(fs), Box::new(runner));
        let err = service
            .scaffold(&demo(), Path::new(PARENT), &mut NoopObserver)
            .unwrap_err();

        assert!(matches!(
            err,
            QuickstartError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn fetch_receives_resolved_template_and_target() {
        let fs = fs_with(&[]);
        let mut fetcher = MockTemplateFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|t, dest| t.url.ends_with("quickstart-ts.git") && dest == Path::new("/work/demo"))
            .times(1)
            .returning(|t, _| {
                Err(ApplicationError::FetchFailed {
                    template: t.spec(),
                    reason: "network unreachable".into(),
                }
                .into())
            });
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let service = ScaffoldService::new(Box::new(fetcher), Box::new(fs), Box::new(runner));
        let err = service
            .scaffold(&demo(), Path::new(PARENT), &mut NoopObserver)
            .unwrap_err();
        assert!(err.to_string().contains("network unreachable"));
    }

    #[test]
    fn ts_pnpm_scenario_runs_every_step() {
        let mut fs = fs_with(&[
            project("vueless.config.js"),
            project("vueless.config.ts"),
            project("package-lock.json"),
            project("pnpm-lock.yaml"),
            project(".env.local.example"),
        ]);
        fs.expect_remove_file()
            .withf(|p| p == project("vueless.config.js"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_remove_file()
            .withf(|p| p == project("package-lock.json"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_copy_file()
            .withf(|from, to| from == project(".env.local.example") && to == project(".env.local"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_read_to_string()
            .withf(|p| p == project("package.json"))
            .returning(|_| Ok("{\n  \"name\": \"demo\",\n  \"private\": true\n}\n".into()));
        let written = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&written);
        fs.expect_write_file()
            .withf(|p, _| p == project("package.json"))
            .times(1)
            .returning(move |_, content| {
                *sink.lock().unwrap() = content.to_string();
                Ok(())
            });

        let calls = Arc::new(Mutex::new(Vec::new()));
        let runner = recording_runner(Arc::clone(&calls), |spec| {
            if spec.command.args == ["--version"] {
                CommandOutput {
                    stdout: "9.1.0\n".into(),
                    ..CommandOutput::success()
                }
            } else {
                CommandOutput::success()
            }
        });

        let service = ScaffoldService::new(Box::new(ok_fetcher()), Box::new(fs), Box::new(runner));
        let report = service
            .scaffold(&demo(), Path::new(PARENT), &mut NoopObserver)
            .unwrap();

        let calls = calls.lock().unwrap();
        let rendered: Vec<String> = calls.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            ["pnpm install", "npx vueless init --pnpm", "pnpm --version"]
        );
        assert!(calls.iter().all(|c| c.cwd == Path::new("/work/demo")));
        assert_eq!(
            calls[0].env,
            vec![(USER_AGENT_ENV.to_string(), "pnpm".to_string())]
        );
        assert!(calls[1].env.is_empty(), "hint goes to install only");

        assert_eq!(
            report.removed,
            vec![PathBuf::from("vueless.config.js"), PathBuf::from("package-lock.json")]
        );
        assert!(report.env_file_created);
        assert_eq!(report.package_manager_field.as_deref(), Some("pnpm@9.1.0"));
        assert!(report.warnings.is_empty());
        assert_eq!(report.next_steps(), "cd demo && pnpm run dev");

        let manifest = written.lock().unwrap().clone();
        assert_eq!(
            manifest,
            "{\n  \"name\": \"demo\",\n  \"private\": true,\n  \"packageManager\": \"pnpm@9.1.0\"\n}\n"
        );
    }

    #[test]
    fn failed_install_stops_before_init() {
        let fs = fs_with(&[]);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let runner = recording_runner(Arc::clone(&calls), |_| CommandOutput {
            stderr: "ERR_PNPM_FETCH_404".into(),
            ..CommandOutput::with_code(1)
        });

        let service = ScaffoldService::new(Box::new(ok_fetcher()), Box::new(fs), Box::new(runner));
        let err = service
            .scaffold(&demo(), Path::new(PARENT), &mut NoopObserver)
            .unwrap_err();

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(err.child_exit_code(), Some(1));
        match err {
            QuickstartError::Application(ApplicationError::CommandFailed {
                command, stderr, ..
            }) => {
                assert_eq!(command, "pnpm install");
                assert_eq!(stderr.as_deref(), Some("ERR_PNPM_FETCH_404"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failed_init_leaves_manifest_alone() {
        // No read/write expectations: touching the manifest would panic.
        let fs = fs_with(&[]);
        let runner = recording_runner(Arc::new(Mutex::new(Vec::new())), |spec| {
            if spec.command.program == "npx" {
                CommandOutput::with_code(2)
            } else {
                CommandOutput::success()
            }
        });

        let service = ScaffoldService::new(Box::new(ok_fetcher()), Box::new(fs), Box::new(runner));
        let err = service
            .scaffold(&demo(), Path::new(PARENT), &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err.child_exit_code(), Some(2));
    }

    #[derive(Default)]
    struct Recorder {
        steps: Vec<ScaffoldStep>,
        warnings: Vec<String>,
    }

    impl ScaffoldObserver for Recorder {
        fn on_step(&mut self, step: &ScaffoldStep) {
            self.steps.push(step.clone());
        }
        fn on_warning(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    #[test]
    fn version_detection_failure_is_only_a_warning() {
        let fs = fs_with(&[]);
        let runner = recording_runner(Arc::new(Mutex::new(Vec::new())), |spec| {
            if spec.command.args == ["--version"] {
                CommandOutput::with_code(127)
            } else {
                CommandOutput::success()
            }
        });
        let selection = Selection::new("demo", Variant::Js, PackageManager::Bun);

        let service = ScaffoldService::new(Box::new(ok_fetcher()), Box::new(fs), Box::new(runner));
        let mut recorder = Recorder::default();
        let report = service
            .scaffold(&selection, Path::new(PARENT), &mut recorder)
            .unwrap();

        assert_eq!(report.package_manager_field, None);
        assert!(!report.env_file_created);
        assert!(report.removed.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(recorder.warnings, report.warnings);
        assert!(recorder.warnings[0].contains("bun"));
        assert_eq!(recorder.steps.len(), 4);
        assert!(matches!(recorder.steps[0], ScaffoldStep::Fetching { .. }));
        assert_eq!(
            recorder.steps[2],
            ScaffoldStep::Installing {
                command: "bun install".into()
            }
        );
    }

    #[test]
    fn captured_stdio_is_forwarded_to_children() {
        let mut fs = fs_with(&[]);
        fs.expect_read_to_string()
            .returning(|_| Ok("{}".into()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let runner = recording_runner(Arc::clone(&calls), |_| CommandOutput {
            stdout: "1.22.0".into(),
            ..CommandOutput::success()
        });

        let service = ScaffoldService::new(Box::new(ok_fetcher()), Box::new(fs), Box::new(runner))
            .with_child_stdio(StdioMode::Capture);
        service
            .scaffold(&Selection::default(), Path::new(PARENT), &mut NoopObserver)
            .unwrap();
        assert!(calls
            .lock()
            .unwrap()
            .iter()
            .all(|c| c.stdio == StdioMode::Capture));
    }

    #[test]
    fn plan_uses_substituted_catalog() {
        let service = ScaffoldService::new(
            Box::new(MockTemplateFetcher::new()),
            Box::new(MockFilesystem::new()),
            Box::new(MockCommandRunner::new()),
        )
        .with_catalog(
            TemplateCatalog::official().with(Variant::Ts, RemoteTemplate::new("/local/ts", "main")),
        );

        let plan = service.plan(&demo(), Path::new(PARENT)).unwrap();
        assert_eq!(plan.template.url, "/local/ts");
        assert_eq!(plan.project_dir, PathBuf::from("/work/demo"));
        assert_eq!(plan.init.to_string(), "npx vueless init --pnpm");
        assert_eq!(plan.cleanup.entries().len(), 4);
    }

    #[test]
    fn set_package_manager_replaces_existing_value_in_place() {
        let raw = r#"{"name":"x","packageManager":"npm@9.0.0","version":"1.0.0"}"#;
        let out = set_package_manager(raw, "yarn@4.1.0").unwrap();
        assert_eq!(
            out,
            "{\n  \"name\": \"x\",\n  \"packageManager\": \"yarn@4.1.0\",\n  \"version\": \"1.0.0\"\n}\n"
        );
    }

    #[test]
    fn set_package_manager_rejects_non_objects() {
        assert!(set_package_manager("[1, 2]", "npm@10.0.0").is_err());
        assert!(set_package_manager("not json", "npm@10.0.0").is_err());
    }
}
