//! OpenAI-compatible embedding backend.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::models::EmbeddingVector;

use super::config::EmbeddingConfig;
use super::provider::EmbeddingProvider;

/// Embedding provider backed by an OpenAI-compatible embeddings endpoint.
pub struct OpenAiEmbeddingProvider {
    client: Client,
    api_key: String,
    config: EmbeddingConfig,
}

impl OpenAiEmbeddingProvider {
    pub fn new(api_key: String, config: EmbeddingConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    /// Creates a provider from `OPENAI_API_KEY` and `EMBEDDING_*`
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        Ok(Self::new(api_key, EmbeddingConfig::from_env()))
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    input: Vec<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        let start = Instant::now();
        let url = format!("{}/embeddings", self.config.api_base);

        let request = EmbedRequest {
            input: texts.to_vec(),
            model: self.config.model.clone(),
        };

        debug!(count = texts.len(), model = %self.config.model, "sending embedding batch");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("failed to send embedding request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "embedding request failed with status {status}: {error_text}"
            ));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .context("failed to parse embedding response")?;

        debug!(latency_ms = start.elapsed().as_millis() as u64, "embeddings received");

        Ok(embed_response
            .data
            .into_iter()
            .map(|d| EmbeddingVector::new(d.embedding))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.config.api_base);
        match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("embedding health check failed: {e}");
                Ok(false)
            }
        }
    }
}
