//! Local model backend via `ollama run`.

use async_trait::async_trait;

use crate::error::{CommandError, GenerateError};
use crate::llm::provider::{MessageBackend, Provider};
use crate::runner::{CommandRunner, CommandSpec};

/// Runs `ollama run <model> <prompt>` and returns its output as-is.
///
/// The runner already trims stdout; nothing else is stripped, including any
/// reasoning preamble the model prints.
pub struct OllamaBackend<'a> {
    runner: &'a dyn CommandRunner,
    model: String,
}

impl<'a> OllamaBackend<'a> {
    pub fn new(runner: &'a dyn CommandRunner, model: impl Into<String>) -> Self {
        Self {
            runner,
            model: model.into(),
        }
    }
}

#[async_trait]
impl MessageBackend for OllamaBackend<'_> {
    fn provider(&self) -> Provider {
        Provider::Ollama
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        let spec = CommandSpec::new("ollama", ["run", self.model.as_str(), prompt]);

        match self.runner.run(&spec).await {
            Ok(output) => Ok(output.unwrap_or_default()),
            Err(CommandError::SpawnFailed { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Err(GenerateError::OllamaNotInstalled)
            }
            Err(e) => Err(e.into()),
        }
    }
}
