//! Configuration for the embedding service.

use serde::{Deserialize, Serialize};

/// Configuration for the embedding oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name.
    pub model: String,

    /// Expected vector dimension.
    pub dimension: usize,

    /// Base URL of the embeddings API.
    pub api_base: String,

    /// Maximum texts per upstream request.
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-ada-002".to_string(),
            dimension: 1536,
            api_base: "https://api.openai.com/v1".to_string(),
            batch_size: 64,
        }
    }
}

impl EmbeddingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the model name and its dimension.
    pub fn with_model(mut self, model: impl Into<String>, dimension: usize) -> Self {
        self.model = model.into();
        self.dimension = dimension;
        self
    }

    /// Builder: set the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Builder: set the upstream batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model: std::env::var("EMBEDDING_MODEL").unwrap_or(defaults.model),
            dimension: std::env::var("EMBEDDING_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.dimension),
            api_base: std::env::var("EMBEDDING_API_BASE").unwrap_or(defaults.api_base),
            batch_size: std::env::var("EMBEDDING_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.batch_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.model, "text-embedding-ada-002");
        assert_eq!(config.dimension, 1536);
        assert_eq!(config.batch_size, 64);
    }

    #[test]
    fn test_config_builder() {
        let config = EmbeddingConfig::new()
            .with_model("mxbai-embed-large", 1024)
            .with_api_base("http://localhost:11434/v1")
            .with_batch_size(0);

        assert_eq!(config.model, "mxbai-embed-large");
        assert_eq!(config.dimension, 1024);
        assert_eq!(config.batch_size, 1); // Clamped
    }
}
