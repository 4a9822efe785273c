//! External process execution.
//!
//! Every check stage talks to its external tools (pixi, git, rattler-build
//! scripts) through the [`ProcessRunner`] trait, so stages can be unit tested
//! against [`mock::MockRunner`] without spawning anything.
//!
//! Commands are run in one of two modes:
//! - [`ProcessRunner::run`] inherits the parent's stdio so the user sees the
//!   tool's output live as it streams.
//! - [`ProcessRunner::run_captured`] pipes stdout/stderr as text, for
//!   sub-checks that must inspect output (tag listing, commit hashes).
//!
//! A missing binary is reported as exit code 127 (the conventional "command
//! not found" code) rather than an error, so the stage layer handles it
//! uniformly with any other non-zero exit.

pub mod mock;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ShipcheckError;

/// A command to execute: program, arguments, and optional working directory.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Program binary name (resolved on PATH).
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,

    /// Working directory (current directory if unset).
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a spec for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Render the command line for diagnostics.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Exit status of an executed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandStatus {
    /// Build a status from an optional exit code.
    pub fn from_code(exit_code: Option<i32>) -> Self {
        Self {
            exit_code,
            success: exit_code == Some(0),
        }
    }

    /// Synthetic status for a binary that could not be located.
    pub fn not_found() -> Self {
        Self::from_code(Some(127))
    }
}

/// Captured output from a command run in captured mode.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    /// Exit status.
    pub status: CommandStatus,

    /// Standard output as text.
    pub stdout: String,

    /// Standard error as text.
    pub stderr: String,
}

impl CapturedOutput {
    fn empty(status: CommandStatus) -> Self {
        Self {
            status,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Executes external commands on behalf of check stages.
pub trait ProcessRunner {
    /// Run a command with inherited stdio (output streams live).
    fn run(&self, spec: &CommandSpec) -> CommandStatus;

    /// Run a command capturing stdout/stderr as text.
    fn run_captured(&self, spec: &CommandSpec) -> CapturedOutput;
}

/// A non-zero exit is an expected stage outcome; it is surfaced at debug
/// level only.
fn log_tool_failure(spec: &CommandSpec, status: CommandStatus) {
    if !status.success {
        tracing::debug!(
            "{}",
            ShipcheckError::ToolFailed {
                command: spec.display(),
                code: status.exit_code,
            }
        );
    }
}

/// Real process runner backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> CommandStatus {
        let mut cmd = self.build(spec);
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        match cmd.status() {
            Ok(status) => {
                let status = CommandStatus::from_code(status.code());
                log_tool_failure(spec, status);
                status
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(
                    "{}",
                    ShipcheckError::ToolNotFound {
                        command: spec.display()
                    }
                );
                CommandStatus::not_found()
            }
            Err(e) => {
                tracing::error!("Failed to spawn '{}': {}", spec.display(), e);
                CommandStatus::from_code(None)
            }
        }
    }

    fn run_captured(&self, spec: &CommandSpec) -> CapturedOutput {
        let mut cmd = self.build(spec);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        match cmd.output() {
            Ok(output) => {
                let status = CommandStatus::from_code(output.status.code());
                log_tool_failure(spec, status);
                CapturedOutput {
                    status,
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(
                    "{}",
                    ShipcheckError::ToolNotFound {
                        command: spec.display()
                    }
                );
                CapturedOutput::empty(CommandStatus::not_found())
            }
            Err(e) => {
                tracing::error!("Failed to spawn '{}': {}", spec.display(), e);
                CapturedOutput::empty(CommandStatus::from_code(None))
            }
        }
    }
}
