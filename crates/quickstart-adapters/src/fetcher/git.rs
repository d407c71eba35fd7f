//! Shallow, history-free clone through the `git` binary.

use std::path::Path;

use tracing::{debug, info, instrument};

use quickstart_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, StdioMode, TemplateFetcher},
    },
    domain::{CommandLine, RemoteTemplate},
    error::QuickstartResult,
};

use super::VCS_DIR;
use crate::{filesystem::map_io_error, runner::ProcessRunner};

/// Clones `url#branch` with depth 1, then deletes `.git` so the project
/// starts without the template's history or remote.
pub struct GitFetcher {
    runner: Box<dyn CommandRunner>,
}

impl GitFetcher {
    pub fn new() -> Self {
        Self::with_runner(Box::new(ProcessRunner::new()))
    }

    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn clone_command(template: &RemoteTemplate, destination: &Path) -> CommandLine {
        CommandLine::new(
            "git",
            [
                "clone".to_string(),
                "--depth".into(),
                "1".into(),
                "--single-branch".into(),
                "--branch".into(),
                template.branch.clone(),
                "--".into(),
                template.url.clone(),
                destination.display().to_string(),
            ],
        )
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateFetcher for GitFetcher {
    #[instrument(skip_all, fields(template = %template, dest = %destination.display()))]
    fn fetch(&self, template: &RemoteTemplate, destination: &Path) -> QuickstartResult<()> {
        let failed = |reason: String| ApplicationError::FetchFailed {
            template: template.spec(),
            reason,
        };

        let cwd = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let spec = CommandSpec::new(Self::clone_command(template, destination), cwd)
            .stdio(StdioMode::Capture);

        debug!(command = %spec, "Running git clone");
        let output = self.runner.run(&spec).map_err(|e| failed(e.to_string()))?;
        if !output.is_success() {
            let stderr = output.stderr.trim();
            let reason = if stderr.is_empty() {
                format!("git exited with {:?}", output.code)
            } else {
                stderr.to_string()
            };
            return Err(failed(reason).into());
        }

        let vcs = destination.join(VCS_DIR);
        if vcs.exists() {
            std::fs::remove_dir_all(&vcs).map_err(|e| map_io_error(&vcs, e, "remove git metadata"))?;
        }

        info!("Template cloned");
        Ok(())
    }
}
