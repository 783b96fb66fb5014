//! Embedding service: symbol-keyed batch embedding.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::models::EmbeddingVector;

use super::config::EmbeddingConfig;
use super::mock_provider::MockEmbeddingProvider;
use super::provider::EmbeddingProvider;

/// High-level embedding interface.
///
/// Takes symbol-keyed texts, batches them through the provider in a stable
/// key order, and returns the same key set mapped to vectors.
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: EmbeddingConfig) -> Self {
        info!(
            provider = provider.model_name(),
            dimension = provider.dimension(),
            "embedding service initialized"
        );
        Self { provider, config }
    }

    /// Creates a service with a mock provider (for testing).
    pub fn with_mock(dimension: usize) -> Self {
        Self::new(
            Arc::new(MockEmbeddingProvider::new(dimension)),
            EmbeddingConfig::default(),
        )
    }

    /// Embeds symbol-keyed texts; the returned map covers exactly the input
    /// key set.
    pub async fn embed_keyed(
        &self,
        texts: &BTreeMap<String, String>,
    ) -> Result<HashMap<String, EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(HashMap::new());
        }

        let symbols: Vec<&String> = texts.keys().collect();
        let values: Vec<String> = texts.values().cloned().collect();

        let mut vectors = Vec::with_capacity(values.len());
        for chunk in values.chunks(self.config.batch_size) {
            debug!(count = chunk.len(), "embedding batch");
            let batch = self.provider.embed_batch(chunk).await?;
            if batch.len() != chunk.len() {
                anyhow::bail!(
                    "embedding provider returned {} vectors for {} texts",
                    batch.len(),
                    chunk.len()
                );
            }
            vectors.extend(batch);
        }

        Ok(symbols
            .into_iter()
            .cloned()
            .zip(vectors)
            .collect())
    }

    /// Vector dimension of the underlying provider.
    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    /// Checks whether the underlying provider is reachable.
    pub async fn health_check(&self) -> Result<bool> {
        self.provider.health_check().await
    }
}
