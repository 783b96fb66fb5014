//! Mock embedding provider for testing.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::EmbeddingVector;

use super::provider::EmbeddingProvider;

/// Mock embedding provider.
///
/// Generates deterministic, normalized vectors from a text hash so tests
/// are reproducible. Specific texts can be pinned to hand-picked vectors
/// to shape similarity structure in clustering tests.
pub struct MockEmbeddingProvider {
    dimension: usize,
    should_fail: bool,
    overrides: HashMap<String, Vec<f32>>,
}

impl MockEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            should_fail: false,
            overrides: HashMap::new(),
        }
    }

    /// Makes the provider fail on all operations.
    pub fn should_fail(mut self, fail: bool) -> Self {
        self.should_fail = fail;
        self
    }

    /// Pins an exact vector for a given input text.
    pub fn with_vector_for(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.overrides.insert(text.into(), vector);
        self
    }

    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        if let Some(vector) = self.overrides.get(text) {
            return vector.clone();
        }

        let hash = Self::simple_hash(text);
        let mut vector = Vec::with_capacity(self.dimension);

        for i in 0..self.dimension {
            let value = ((hash.wrapping_add(i as u64).wrapping_mul(2654435761)) % 10000) as f32
                / 10000.0
                - 0.5;
            vector.push(value);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }

    fn simple_hash(text: &str) -> u64 {
        let mut hash: u64 = 5381;
        for byte in text.bytes() {
            hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
        }
        hash
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        if self.should_fail {
            anyhow::bail!("mock embedding provider configured to fail");
        }

        Ok(texts
            .iter()
            .map(|text| EmbeddingVector::new(self.generate_embedding(text)))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.should_fail)
    }
}
