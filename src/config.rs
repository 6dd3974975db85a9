//! Run settings, resolved once at startup from the environment.

use std::env;

use tracing::debug;

/// Instruction sent ahead of the change context.
pub const PROMPT: &str = "Write a short (two sentences max) commit message that encompasses the git diffs shown. Be as succinct, clear and brief as possible. **CRITICAL**: Respond only with the commit message, nothing else.";

pub const OLLAMA_MODEL: &str = "deepseek-r1:8b";
pub const OPENAI_MODEL: &str = "o3-mini";
pub const ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";

/// Token budget for hosted completions.
pub const MAX_TOKENS: u32 = 100;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

pub const EDITOR_ENV_VAR: &str = "EDITOR";
pub const OPENAI_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

const DEFAULT_EDITOR: &str = "nano";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";

/// Immutable configuration for a single run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub prompt: String,
    pub ollama_model: String,
    pub openai_model: String,
    pub anthropic_model: String,
    pub max_tokens: u32,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub editor: String,
    pub remote: String,
    pub branch: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            ollama_model: OLLAMA_MODEL.to_string(),
            openai_model: OPENAI_MODEL.to_string(),
            anthropic_model: ANTHROPIC_MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            openai_base_url: OPENAI_BASE_URL.to_string(),
            anthropic_base_url: ANTHROPIC_BASE_URL.to_string(),
            openai_api_key: None,
            anthropic_api_key: None,
            editor: DEFAULT_EDITOR.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl Settings {
    /// Build settings from `EDITOR`, `OPENAI_API_KEY` and `ANTHROPIC_API_KEY`.
    ///
    /// Unset or empty variables fall back to defaults (`nano`, no key).
    pub fn from_env() -> Self {
        let settings = Self {
            editor: non_empty_var(EDITOR_ENV_VAR).unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            openai_api_key: non_empty_var(OPENAI_KEY_ENV_VAR),
            anthropic_api_key: non_empty_var(ANTHROPIC_KEY_ENV_VAR),
            ..Self::default()
        };

        debug!(
            editor = %settings.editor,
            openai_key = settings.openai_api_key.is_some(),
            anthropic_key = settings.anthropic_api_key.is_some(),
            "Resolved settings from environment"
        );

        settings
    }

    pub fn with_push_target(mut self, remote: impl Into<String>, branch: impl Into<String>) -> Self {
        self.remote = remote.into();
        self.branch = branch.into();
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
