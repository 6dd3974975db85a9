//! Commit message generation: prompt assembly and backend dispatch.

use tracing::debug;

use crate::config::{ANTHROPIC_KEY_ENV_VAR, OPENAI_KEY_ENV_VAR, Settings};
use crate::console;
use crate::error::GenerateError;
use crate::llm::anthropic::AnthropicBackend;
use crate::llm::ollama::OllamaBackend;
use crate::llm::openai::OpenAiBackend;
use crate::llm::provider::{MessageBackend, Provider};
use crate::runner::CommandRunner;

/// Instruction, a blank line, then the change context.
pub fn build_prompt(instruction: &str, context: &str) -> String {
    format!("{instruction}\n\n{context}")
}

/// Construct the backend for `provider`.
///
/// Hosted providers need their API key in [`Settings`]; a missing key is an
/// error here rather than an authentication failure later.
pub fn backend_for<'a>(
    provider: Provider,
    settings: &Settings,
    runner: &'a dyn CommandRunner,
) -> Result<Box<dyn MessageBackend + 'a>, GenerateError> {
    match provider {
        Provider::Ollama => Ok(Box::new(OllamaBackend::new(
            runner,
            settings.ollama_model.clone(),
        ))),
        Provider::OpenAi => {
            let key = settings
                .openai_api_key
                .clone()
                .ok_or(GenerateError::MissingApiKey {
                    provider,
                    var: OPENAI_KEY_ENV_VAR,
                })?;
            Ok(Box::new(OpenAiBackend::new(
                key,
                settings.openai_model.clone(),
                settings.max_tokens,
                settings.openai_base_url.clone(),
            )))
        }
        Provider::Anthropic => {
            let key = settings
                .anthropic_api_key
                .clone()
                .ok_or(GenerateError::MissingApiKey {
                    provider,
                    var: ANTHROPIC_KEY_ENV_VAR,
                })?;
            Ok(Box::new(AnthropicBackend::new(
                key,
                settings.anthropic_model.clone(),
                settings.max_tokens,
                settings.anthropic_base_url.clone(),
            )))
        }
    }
}

/// Sends the fixed instruction plus context to a backend.
pub struct MessageGenerator<'a> {
    instruction: &'a str,
    backend: Box<dyn MessageBackend + 'a>,
}

impl<'a> MessageGenerator<'a> {
    pub fn new(instruction: &'a str, backend: Box<dyn MessageBackend + 'a>) -> Self {
        Self {
            instruction,
            backend,
        }
    }

    /// Build the generator for `provider` from settings.
    pub fn for_provider(
        provider: Provider,
        settings: &'a Settings,
        runner: &'a dyn CommandRunner,
    ) -> Result<Self, GenerateError> {
        if provider.is_hosted() {
            console::log(format!("Using third-party provider: {}...", provider.cli_name()));
        }
        let backend = backend_for(provider, settings, runner)?;
        Ok(Self::new(&settings.prompt, backend))
    }

    pub fn provider(&self) -> Provider {
        self.backend.provider()
    }

    pub async fn generate(&self, context: &str) -> Result<String, GenerateError> {
        let provider = self.backend.provider();

        console::log(format!("Preparing prompt for {provider}..."));
        let prompt = build_prompt(self.instruction, context);
        debug!(prompt_len = prompt.len(), context_len = context.len(), "Built prompt");

        console::log(format!("Sending request to {provider}..."));
        let message = self.backend.complete(&prompt).await?;
        console::log(format!("Received response from {provider}."));

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::MockMessageBackend;
    use crate::runner::MockCommandRunner;

    #[test]
    fn test_build_prompt_joins_with_blank_line() {
        assert_eq!(build_prompt("Do it.", "C"), "Do it.\n\nC");
        assert_eq!(build_prompt("Do it.", ""), "Do it.\n\n");
    }

    #[tokio::test]
    async fn test_generate_sends_instruction_and_context() {
        let mut backend = MockMessageBackend::new();
        backend.expect_provider().return_const(Provider::Ollama);
        backend
            .expect_complete()
            .withf(|prompt: &str| prompt == "INSTR\n\ndiff --git a/x b/x")
            .times(1)
            .returning(|_| Ok("raw output".to_string()));

        let generator = MessageGenerator::new("INSTR", Box::new(backend));
        let message = generator.generate("diff --git a/x b/x").await.unwrap();
        assert_eq!(message, "raw output");
    }

    #[tokio::test]
    async fn test_generate_propagates_backend_error() {
        let mut backend = MockMessageBackend::new();
        backend.expect_provider().return_const(Provider::OpenAi);
        backend.expect_complete().times(1).returning(|_| {
            Err(GenerateError::Api {
                provider: Provider::OpenAi,
                status: 401,
                body: "invalid key".to_string(),
            })
        });

        let generator = MessageGenerator::new("INSTR", Box::new(backend));
        let err = generator.generate("ctx").await.unwrap_err();
        assert!(matches!(err, GenerateError::Api { status: 401, .. }));
    }

    #[test]
    fn test_backend_for_selects_provider() {
        let runner = MockCommandRunner::new();
        let settings = Settings {
            openai_api_key: Some("sk".to_string()),
            anthropic_api_key: Some("sk-ant".to_string()),
            ..Settings::default()
        };

        for provider in [Provider::Ollama, Provider::OpenAi, Provider::Anthropic] {
            let backend = backend_for(provider, &settings, &runner).unwrap();
            assert_eq!(backend.provider(), provider);
        }
    }

    #[test]
    fn test_backend_for_hosted_requires_key() {
        let runner = MockCommandRunner::new();
        let settings = Settings::default();

        let err = backend_for(Provider::OpenAi, &settings, &runner).err().unwrap();
        assert!(matches!(
            err,
            GenerateError::MissingApiKey {
                var: "OPENAI_API_KEY",
                ..
            }
        ));

        let err = backend_for(Provider::Anthropic, &settings, &runner).err().unwrap();
        assert!(matches!(
            err,
            GenerateError::MissingApiKey {
                var: "ANTHROPIC_API_KEY",
                ..
            }
        ));
    }

    #[test]
    fn test_local_backend_needs_no_key() {
        let runner = MockCommandRunner::new();
        assert!(backend_for(Provider::Ollama, &Settings::default(), &runner).is_ok());
    }
}
