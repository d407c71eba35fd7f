//! Child process adapter using `std::process`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use quickstart_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec, StdioMode},
    },
    error::QuickstartResult,
};

/// Runs commands as blocking child processes.
///
/// The child inherits our environment plus `spec.env`. Nothing is killed or
/// timed out: a hung child blocks the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn build(spec: &CommandSpec) -> Command {
        // npm, npx, yarn and pnpm are `.cmd` shims on Windows and cannot be
        // spawned directly.
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&spec.command.program);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = Command::new(&spec.command.program);

        cmd.args(&spec.command.args)
            .current_dir(&spec.cwd)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit());
        cmd
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %spec, cwd = %spec.cwd.display()))]
    fn run(&self, spec: &CommandSpec) -> QuickstartResult<CommandOutput> {
        let mut cmd = Self::build(spec);
        let unavailable = |e: std::io::Error| ApplicationError::CommandUnavailable {
            command: spec.to_string(),
            reason: e.to_string(),
        };

        let output = match spec.stdio {
            StdioMode::Inherit => {
                let status = cmd.status().map_err(unavailable)?;
                CommandOutput {
                    code: status.code(),
                    ..CommandOutput::default()
                }
            }
            StdioMode::Capture => {
                let out = cmd
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .map_err(unavailable)?;
                CommandOutput {
                    code: out.status.code(),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                }
            }
        };

        debug!(code = ?output.code, "Command finished");
        Ok(output)
    }
}
