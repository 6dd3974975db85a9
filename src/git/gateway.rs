//! Git operations for a commit session: stage, inspect, commit and push.
//!
//! Mutating and reporting commands shell out to the system `git` binary
//! through a [`CommandRunner`], inheriting the user's git config, hooks, SSH
//! agent and credential store.

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::console;
use crate::error::CommandError;
use crate::runner::{CommandRunner, CommandSpec};

/// Git commands scoped to one working directory.
pub struct GitGateway<'a> {
    runner: &'a dyn CommandRunner,
    workdir: PathBuf,
}

impl<'a> GitGateway<'a> {
    pub fn new(runner: &'a dyn CommandRunner, workdir: impl AsRef<Path>) -> Self {
        Self {
            runner,
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Whether the working directory itself holds repository metadata.
    ///
    /// Parent directories are not searched.
    pub fn is_repository(&self) -> bool {
        match Repository::open(&self.workdir) {
            Ok(repo) => !repo.is_bare(),
            Err(e) => {
                debug!("Not a repository at {}: {}", self.workdir.display(), e);
                false
            }
        }
    }

    /// `git add .`
    pub async fn stage_all(&self) -> Result<(), CommandError> {
        console::log("Staging all changes...");
        self.git(["add", "."]).await.map(|_| ())
    }

    /// `git diff --cached`
    pub async fn cached_diff(&self) -> Result<String, CommandError> {
        console::log("Retrieving git changes...");
        self.git(["diff", "--cached"]).await
    }

    /// `git status`
    pub async fn status_report(&self) -> Result<String, CommandError> {
        console::log("Retrieving commit summary...");
        self.git(["status"]).await
    }

    /// `git commit -m <message>`, with the message as a single argument.
    pub async fn commit(&self, message: &str) -> Result<(), CommandError> {
        console::log(format!("Committing changes with message: {message}"));
        self.git(["commit", "-m", message]).await.map(|_| ())
    }

    /// `git push <remote> <branch>`
    pub async fn push(&self, remote: &str, branch: &str) -> Result<(), CommandError> {
        console::log("Pushing changes to remote repository...");
        self.git(["push", remote, branch]).await?;
        console::log("Push completed.");
        Ok(())
    }

    async fn git<const N: usize>(&self, args: [&str; N]) -> Result<String, CommandError> {
        let spec = CommandSpec::new("git", args).current_dir(&self.workdir);
        let output = self.runner.run(&spec).await?;
        Ok(output.unwrap_or_default())
    }
}
