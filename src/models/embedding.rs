//! Embedding vectors and similarity math.

use serde::{Deserialize, Serialize};

/// A fixed-length embedding vector for one summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector {
    /// Vector components.
    pub vector: Vec<f32>,

    /// Vector length.
    pub dimension: usize,
}

impl EmbeddingVector {
    /// Creates a new embedding vector.
    pub fn new(vector: Vec<f32>) -> Self {
        let dimension = vector.len();
        Self { vector, dimension }
    }

    /// Computes cosine similarity with another vector.
    ///
    /// Returns 0.0 when dimensions differ or either vector is zero.
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> f32 {
        if self.dimension != other.dimension {
            return 0.0;
        }

        let dot_product: f32 = self
            .vector
            .iter()
            .zip(other.vector.iter())
            .map(|(a, b)| a * b)
            .sum();

        let norm_a: f32 = self.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = other.vector.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }

    /// Normalizes the vector in place (magnitude = 1).
    pub fn normalize(&mut self) {
        let norm: f32 = self.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut self.vector {
                *value /= norm;
            }
        }
    }

    /// Checks whether the vector has unit magnitude.
    pub fn is_normalized(&self) -> bool {
        let norm: f32 = self.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        (norm - 1.0).abs() < 1e-6
    }
}

/// Computes the centroid (element-wise mean) of a group of embeddings.
///
/// Returns `None` for an empty group or mismatched dimensions.
pub fn compute_centroid(embeddings: &[&EmbeddingVector]) -> Option<EmbeddingVector> {
    if embeddings.is_empty() {
        return None;
    }

    let dimension = embeddings[0].dimension;
    if dimension == 0 || !embeddings.iter().all(|e| e.dimension == dimension) {
        return None;
    }

    let mut centroid = vec![0.0f32; dimension];
    let count = embeddings.len() as f32;

    for embedding in embeddings {
        for (i, val) in embedding.vector.iter().enumerate() {
            centroid[i] += val / count;
        }
    }

    Some(EmbeddingVector::new(centroid))
}
