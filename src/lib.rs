//! commitski - stage your changes and let an LLM draft the commit message.
//!
//! # Overview
//!
//! commitski stages everything in the working tree, sends the staged diff (or
//! a short status summary) to a local `ollama` model or a hosted provider, and
//! shows the result. The user accepts it, edits it in `$EDITOR`, or cancels.
//! Accepted and edited messages are committed and pushed.

pub mod config;
pub mod console;
pub mod error;
pub mod git;
pub mod llm;
pub mod review;
pub mod runner;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use config::Settings;
pub use error::{CommandError, GenerateError, ReviewError, SessionError};
pub use llm::{MessageBackend, MessageGenerator, Provider};
pub use review::{ChoicePrompt, ReviewChoice, ReviewOutcome, Reviewer, TerminalPrompt};
pub use runner::{CommandRunner, CommandSpec, OutputMode, SystemRunner};
pub use session::{CommitSession, ContextSource, SessionOutcome};
pub use summary::ChangeSummary;
