//! Typed AI configuration from environment variables.
//!
//! The API key is wrapped in [`SecretString`] to keep it out of logs.

use secrecy::SecretString;

use crate::AiError;

/// Default Anthropic model for both capabilities.
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration for the AI capabilities.
#[derive(Debug)]
pub struct AiConfig {
    /// Anthropic API key.
    pub api_key: SecretString,
    /// Model identifier; override with `FIXFLOW_AI_MODEL`.
    pub model: String,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Requires `ANTHROPIC_API_KEY`; `FIXFLOW_AI_MODEL` optionally picks a
    /// different model.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            AiError::NotConfigured("required environment variable ANTHROPIC_API_KEY is not set".into())
        })?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            model: std::env::var("FIXFLOW_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }

    /// Build a config from explicit values.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
        }
    }
}
