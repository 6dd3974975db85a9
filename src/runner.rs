//! External process execution.
//!
//! Everything the tool shells out to (git, the local model, the editor) goes
//! through [`CommandRunner`]. Arguments are always passed as an argument
//! vector, so nothing is ever interpreted by a shell.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::console;
use crate::error::CommandError;

/// What to do with the child's stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture stdout and return it trimmed.
    Capture,
    /// Inherit the terminal (interactive programs such as editors).
    Inherit,
}

/// A single process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub mode: OutputMode,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            mode: OutputMode::Capture,
        }
    }

    pub fn current_dir(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn inherit_output(mut self) -> Self {
        self.mode = OutputMode::Inherit;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external commands, failing on any non-zero exit.
///
/// Returns `Some(trimmed stdout)` for [`OutputMode::Capture`] and `None` for
/// [`OutputMode::Inherit`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<Option<String>, CommandError>;
}

/// Runner backed by real subprocesses.
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<Option<String>, CommandError> {
        console::log(format!("Running command: {spec}"));

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        let result = match spec.mode {
            OutputMode::Capture => run_captured(&mut cmd, spec).await.map(Some),
            OutputMode::Inherit => run_inherited(&mut cmd, spec).await.map(|()| None),
        };

        if let Err(ref e) = result {
            debug!("Command failed: {spec}: {e}");
        }
        result
    }
}

async fn run_captured(cmd: &mut Command, spec: &CommandSpec) -> Result<String, CommandError> {
    let output = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| CommandError::SpawnFailed {
            command: spec.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(CommandError::NonZeroExit {
            command: spec.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(bytes = stdout.len(), "captured output of {}", spec.program);
    console::log(format!("Command output: {stdout}"));
    Ok(stdout)
}

async fn run_inherited(cmd: &mut Command, spec: &CommandSpec) -> Result<(), CommandError> {
    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| CommandError::SpawnFailed {
            command: spec.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(CommandError::NonZeroExit {
            command: spec.to_string(),
            code: status.code(),
            stderr: String::new(),
        });
    }

    Ok(())
}
