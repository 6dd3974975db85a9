//! commitski - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commitski::config::{DEFAULT_BRANCH, DEFAULT_REMOTE};
use commitski::{CommitSession, ContextSource, SessionOutcome, Settings, SystemRunner, TerminalPrompt, console};

/// Stage all changes and draft the commit message with an LLM.
#[derive(Parser, Debug)]
#[command(name = "commitski")]
#[command(about = "Stage all changes and draft the commit message with an LLM")]
#[command(version)]
struct Cli {
    /// LLM provider: ollama (local), openai or anthropic
    #[arg(default_value = "ollama")]
    provider: String,

    /// What the model sees: the staged diff or a one-line status summary
    #[arg(long, value_enum, default_value_t = ContextSource::Diff)]
    context: ContextSource,

    /// Remote to push to after committing
    #[arg(long, default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Branch to push after committing
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; the console protocol owns stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(SessionOutcome::Committed { .. } | SessionOutcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            console::log(format!("Error: {e}"));
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<SessionOutcome> {
    let workdir = std::env::current_dir().context("Failed to read the current directory")?;
    let settings = Settings::from_env().with_push_target(cli.remote, cli.branch);

    let session = CommitSession::new(&settings, &SystemRunner, &TerminalPrompt, workdir);
    let outcome = session.run(&cli.provider, cli.context).await?;

    Ok(outcome)
}
