//! Interactive review of the generated message: edit, accept or cancel.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use dialoguer::Input;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ReviewError;
use crate::runner::{CommandRunner, CommandSpec};

pub const REVIEW_QUESTION: &str = "Do you want to [E]dit, [A]ccept, or [C]ancel?";

/// The user's answer, matched on its first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    Edit,
    Accept,
    Cancel,
}

impl ReviewChoice {
    /// `e...` edits, `a...` accepts, anything else (including nothing) cancels.
    pub fn parse(answer: &str) -> Self {
        let answer = answer.trim().to_lowercase();
        if answer.starts_with('e') {
            ReviewChoice::Edit
        } else if answer.starts_with('a') {
            ReviewChoice::Accept
        } else {
            ReviewChoice::Cancel
        }
    }
}

/// Where a review ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Accepted(String),
    Edited(String),
    Cancelled,
}

impl ReviewOutcome {
    /// The message to commit, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ReviewOutcome::Accepted(m) | ReviewOutcome::Edited(m) => Some(m),
            ReviewOutcome::Cancelled => None,
        }
    }
}

/// Source of the user's answer to the review question.
pub trait ChoicePrompt: Send + Sync {
    fn ask(&self, question: &str) -> Result<String, ReviewError>;
}

/// Terminal prompt; falls back to a plain stdin line when not attached to a tty.
pub struct TerminalPrompt;

impl ChoicePrompt for TerminalPrompt {
    fn ask(&self, question: &str) -> Result<String, ReviewError> {
        if io::stdin().is_terminal() {
            return Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| ReviewError::Prompt(e.to_string()));
        }

        print!("{question} ");
        io::stdout()
            .flush()
            .map_err(|e| ReviewError::Prompt(e.to_string()))?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| ReviewError::Prompt(e.to_string()))?;
        Ok(line)
    }
}

/// Split `$EDITOR` into program and leading arguments (`code --wait`).
///
/// A value naming an existing file is taken whole, so editor paths with
/// spaces in them still work.
pub fn parse_editor_command(editor: &str) -> Option<(&str, Vec<&str>)> {
    let trimmed = editor.trim();
    if !trimmed.is_empty() && Path::new(trimmed).is_file() {
        return Some((trimmed, Vec::new()));
    }

    let mut parts = trimmed.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

pub struct Reviewer<'a> {
    runner: &'a dyn CommandRunner,
    prompt: &'a dyn ChoicePrompt,
    editor: &'a str,
}

impl<'a> Reviewer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, prompt: &'a dyn ChoicePrompt, editor: &'a str) -> Self {
        Self {
            runner,
            prompt,
            editor,
        }
    }

    /// Show the message and act on the user's choice.
    ///
    /// An edit that leaves the message empty is an error, never a commit.
    pub async fn review(&self, message: &str) -> Result<ReviewOutcome, ReviewError> {
        println!("\nGenerated commit message:\n");
        println!("{message}");
        println!();

        let answer = self.prompt.ask(REVIEW_QUESTION)?;
        let choice = ReviewChoice::parse(&answer);
        debug!(?choice, "Review choice");

        match choice {
            ReviewChoice::Edit => {
                let edited = self.edit(message).await?;
                if edited.is_empty() {
                    return Err(ReviewError::EmptyMessage);
                }
                Ok(ReviewOutcome::Edited(edited))
            }
            ReviewChoice::Accept => Ok(ReviewOutcome::Accepted(message.to_string())),
            ReviewChoice::Cancel => Ok(ReviewOutcome::Cancelled),
        }
    }

    /// Open the editor on a scratch copy of `message` and return the trimmed result.
    ///
    /// The scratch file is removed when this returns, whatever the outcome.
    pub async fn edit(&self, message: &str) -> Result<String, ReviewError> {
        let (program, editor_args) =
            parse_editor_command(self.editor).ok_or(ReviewError::NoEditor)?;

        let mut scratch = tempfile::Builder::new()
            .prefix("commitski-")
            .suffix(".tmp")
            .tempfile()
            .map_err(ReviewError::ScratchFile)?;
        write_scratch(&mut scratch, message)?;

        let path = scratch.path().to_string_lossy().into_owned();
        let mut args = editor_args;
        args.push(path.as_str());

        let spec = CommandSpec::new(program, args).inherit_output();
        self.runner.run(&spec).await?;

        // Read by path: editors that save via rename leave the handle stale.
        let edited = std::fs::read_to_string(scratch.path()).map_err(ReviewError::ScratchFile)?;
        scratch.close().map_err(ReviewError::ScratchFile)?;

        Ok(edited.trim().to_string())
    }
}

fn write_scratch(scratch: &mut NamedTempFile, message: &str) -> Result<(), ReviewError> {
    scratch
        .write_all(message.as_bytes())
        .map_err(ReviewError::ScratchFile)?;
    scratch.flush().map_err(ReviewError::ScratchFile)
}
