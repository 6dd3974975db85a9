//! Provider selection and the backend capability shared by all providers.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::GenerateError;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// Local model served by the `ollama` CLI.
    #[default]
    Ollama,
    OpenAi,
    Anthropic,
}

impl Provider {
    /// Name accepted on the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Provider::Ollama => "ollama",
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Ollama => "Ollama",
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }

    pub fn is_hosted(&self) -> bool {
        !matches!(self, Provider::Ollama)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = GenerateError;

    /// Exact, case-sensitive match on the CLI names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ollama" => Ok(Provider::Ollama),
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(GenerateError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Something that turns a prompt into commit message text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageBackend: Send + Sync {
    fn provider(&self) -> Provider;

    async fn complete(&self, prompt: &str) -> Result<String, GenerateError>;
}
