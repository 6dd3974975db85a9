//! Error types for commitski modules using thiserror.

use thiserror::Error;

use crate::llm::Provider;

/// Errors from running external processes.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from commit message generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Unsupported provider '{0}'. Use one of: ollama, openai, anthropic")]
    UnsupportedProvider(String),

    #[error("{provider} requires an API key. Set the {var} environment variable")]
    MissingApiKey { provider: Provider, var: &'static str },

    #[error("Ollama CLI not found. Install it from https://ollama.com and pull the model first")]
    OllamaNotInstalled,

    #[error("Request to {provider} failed: {source}")]
    Request {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{0} returned an empty completion")]
    EmptyResponse(Provider),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Errors from the interactive review step.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("No commit message provided after editing. Aborting.")]
    EmptyMessage,

    #[error("Failed to read review choice: {0}")]
    Prompt(String),

    #[error("Scratch file error: {0}")]
    ScratchFile(#[source] std::io::Error),

    #[error("EDITOR is set but empty")]
    NoEditor,

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Errors that end a commit session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("This directory is not a Git repository.")]
    NotARepository,

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_message_with_code() {
        let err = CommandError::NonZeroExit {
            command: "git push origin main".to_string(),
            code: Some(128),
            stderr: "rejected".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command `git push origin main` exited with code 128: rejected"
        );
    }

    #[test]
    fn test_non_zero_exit_message_without_code() {
        let err = CommandError::NonZeroExit {
            command: "nano /tmp/x.tmp".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("unknown status"));
    }

    #[test]
    fn test_session_error_is_transparent_for_review() {
        let err = SessionError::from(ReviewError::EmptyMessage);
        assert_eq!(
            err.to_string(),
            "No commit message provided after editing. Aborting."
        );
    }

    #[test]
    fn test_missing_key_names_variable() {
        let err = GenerateError::MissingApiKey {
            provider: Provider::OpenAi,
            var: "OPENAI_API_KEY",
        };
        assert_eq!(
            err.to_string(),
            "OpenAI requires an API key. Set the OPENAI_API_KEY environment variable"
        );
    }
}
