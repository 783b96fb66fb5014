//! Configuration for the summarisation stage.

use serde::{Deserialize, Serialize};

/// Configuration for the summarisation oracle and traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeConfig {
    /// Chat model used by the oracle provider.
    pub model: String,

    /// Base URL of the chat completion API.
    pub api_base: String,

    /// Sampling temperature. Zero keeps summaries reproducible.
    pub temperature: f32,

    /// Response token budget per node.
    pub max_tokens: u32,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            temperature: 0.0,
            max_tokens: 512,
        }
    }
}

impl SummarizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder: set the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Builder: set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Builder: set the response token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens.max(1);
        self
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model: std::env::var("SUMMARY_MODEL").unwrap_or(defaults.model),
            api_base: std::env::var("SUMMARY_API_BASE").unwrap_or(defaults.api_base),
            temperature: std::env::var("SUMMARY_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
            max_tokens: std::env::var("SUMMARY_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_tokens),
        }
    }
}
