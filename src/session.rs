//! The commit session: verify, stage, generate, review, commit and push.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::Settings;
use crate::console;
use crate::error::SessionError;
use crate::git::GitGateway;
use crate::llm::{MessageGenerator, Provider};
use crate::review::{ChoicePrompt, Reviewer};
use crate::runner::CommandRunner;
use crate::summary::ChangeSummary;

/// What the model is given as context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContextSource {
    /// The full staged diff (`git diff --cached`).
    #[default]
    Diff,
    /// The one-line summary derived from `git status`.
    Summary,
}

/// How a session ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Committed { message: String },
    Cancelled,
}

pub struct CommitSession<'a> {
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
    prompt: &'a dyn ChoicePrompt,
    workdir: PathBuf,
}

impl<'a> CommitSession<'a> {
    pub fn new(
        settings: &'a Settings,
        runner: &'a dyn CommandRunner,
        prompt: &'a dyn ChoicePrompt,
        workdir: impl AsRef<Path>,
    ) -> Self {
        Self {
            settings,
            runner,
            prompt,
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Run one session with the provider named on the command line.
    ///
    /// Every failure is returned as-is; nothing is retried. A commit is only
    /// attempted once the review produced a non-empty message.
    pub async fn run(
        &self,
        provider_name: &str,
        context_source: ContextSource,
    ) -> Result<SessionOutcome, SessionError> {
        console::log("Starting the commit process...");

        let git = GitGateway::new(self.runner, &self.workdir);
        if !git.is_repository() {
            return Err(SessionError::NotARepository);
        }

        git.stage_all().await?;
        let context = self.gather_context(&git, context_source).await?;

        let provider: Provider = provider_name.parse()?;
        let generator = MessageGenerator::for_provider(provider, self.settings, self.runner)?;
        let message = generator.generate(&context).await?;

        let reviewer = Reviewer::new(self.runner, self.prompt, &self.settings.editor);
        let outcome = reviewer.review(&message).await?;

        let Some(message) = outcome.message().map(str::to_string) else {
            console::log("Commit canceled by user.");
            return Ok(SessionOutcome::Cancelled);
        };

        git.commit(&message).await?;
        git.push(&self.settings.remote, &self.settings.branch).await?;

        console::log("Commit process completed successfully.");
        Ok(SessionOutcome::Committed { message })
    }

    async fn gather_context(
        &self,
        git: &GitGateway<'_>,
        source: ContextSource,
    ) -> Result<String, SessionError> {
        let status = git.status_report().await?;
        let summary = ChangeSummary::from_status(&status);
        console::log(format!("Found {} file(s) changed", summary.files_changed));
        console::log(format!("Change summary: {summary}"));

        match source {
            ContextSource::Diff => Ok(git.cached_diff().await?),
            ContextSource::Summary => Ok(summary.to_string()),
        }
    }
}
