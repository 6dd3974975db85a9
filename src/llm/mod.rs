//! Commit message generation with a local or hosted LLM.

pub mod anthropic;
pub mod generator;
pub mod ollama;
pub mod openai;
pub mod provider;

pub use anthropic::AnthropicBackend;
pub use generator::{MessageGenerator, backend_for, build_prompt};
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;
pub use provider::{MessageBackend, Provider};
