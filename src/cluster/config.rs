//! Clustering configuration.

use serde::{Deserialize, Serialize};

/// Weights for combining the structural and semantic matrices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FusionWeights {
    /// Weight of the row-normalized adjacency matrix.
    pub adjacency: f64,

    /// Weight of the row-normalized similarity matrix.
    pub similarity: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            adjacency: 0.5,
            similarity: 0.5,
        }
    }
}

/// Configuration for the clustering pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Matrix fusion weights.
    pub weights: FusionWeights,

    /// Exponent applied to the candidate k when scaling quality scores in
    /// the cluster-count search. 1.0 multiplies by k; 0.0 disables the
    /// reward. Treat as a tunable heuristic.
    pub k_reward: f64,

    /// Consecutive score decreases tolerated before the count search stops
    /// early.
    pub patience: usize,

    /// Random seed for the spectral k-means step.
    pub seed: u64,

    /// Maximum k-means iterations per restart.
    pub kmeans_max_iter: usize,

    /// Number of seeded k-means restarts; the lowest-inertia run wins.
    pub kmeans_restarts: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            weights: FusionWeights::default(),
            k_reward: 1.0,
            patience: 5,
            seed: 42,
            kmeans_max_iter: 300,
            kmeans_restarts: 10,
        }
    }
}

impl ClusterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set fusion weights.
    pub fn with_weights(mut self, adjacency: f64, similarity: f64) -> Self {
        self.weights = FusionWeights {
            adjacency,
            similarity,
        };
        self
    }

    /// Builder: set the k-reward exponent.
    pub fn with_k_reward(mut self, k_reward: f64) -> Self {
        self.k_reward = k_reward.max(0.0);
        self
    }

    /// Builder: set the early-stop patience.
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Builder: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_balanced() {
        let config = ClusterConfig::default();
        assert!((config.weights.adjacency - 0.5).abs() < f64::EPSILON);
        assert!((config.weights.similarity - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.patience, 5);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_config_builder() {
        let config = ClusterConfig::new()
            .with_weights(0.7, 0.3)
            .with_k_reward(0.0)
            .with_patience(3)
            .with_seed(7);

        assert!((config.weights.adjacency - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.k_reward, 0.0);
        assert_eq!(config.patience, 3);
        assert_eq!(config.seed, 7);
    }
}
