//! Subprocess execution.
//!
//! The orchestration layer never spawns processes directly; it goes
//! through a [`Runner`] so tests can substitute canned tool output.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::core::errors::{BuildError, Result};

/// Runs an external program and returns its standard output.
pub trait Runner: Send + Sync {
    /// Run `program` with `args`.
    ///
    /// When `quiet` is false the tool's output is echoed to the log as it
    /// is reported. Any non-zero exit is a [`BuildError::ToolInvocationFailed`]
    /// carrying the tool's diagnostic text.
    fn execute(&self, program: &Path, quiet: bool, args: &[String]) -> Result<String>;
}

/// [`Runner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn execute(&self, program: &Path, quiet: bool, args: &[String]) -> Result<String> {
        let pb = ProcessBuilder::new(program).args(args);
        tracing::debug!("running `{}`", pb.display_command());

        let output = pb.exec()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !quiet {
            for line in stdout.lines().chain(stderr.lines()) {
                tracing::info!("{}", line);
            }
        }

        if !output.status.success() {
            let diagnostic = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(BuildError::ToolInvocationFailed {
                program: pb.display_command(),
                message: format!("exit code {:?}\n{}", output.status.code(), diagnostic),
            });
        }

        Ok(stdout)
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Execute the command and wait for completion.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command();

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| BuildError::ToolInvocationFailed {
            program: self.display_command(),
            message: format!("failed to spawn: {}", e),
        })?;

        child
            .wait_with_output()
            .map_err(|e| BuildError::ToolInvocationFailed {
                program: self.display_command(),
                message: format!("failed to wait: {}", e),
            })
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}
