//! Embedding provider trait for abstraction over different backends.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::EmbeddingVector;

/// Trait for embedding oracle backends.
///
/// Implementations must return exactly one vector per input text, in input
/// order; the service layer re-keys the result by symbol.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generates embeddings for a batch of texts.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>>;

    /// Vector dimension produced by this provider.
    fn dimension(&self) -> usize;

    /// Model name, for logging.
    fn model_name(&self) -> &str;

    /// Checks whether the provider is reachable.
    async fn health_check(&self) -> Result<bool>;
}
