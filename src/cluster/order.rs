//! Within-cluster ordering by centroid affinity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{compute_centroid, EmbeddingVector};

/// A group of symbols, ordered from most to least central.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Member symbols, most representative first.
    pub members: Vec<String>,

    /// Mean of the member embeddings.
    pub centroid: EmbeddingVector,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builds a cluster from `members`, sorted by cosine similarity to their
/// centroid in descending order.
///
/// The sort is stable, so members with equal similarity keep their incoming
/// relative order and reordering an already-ordered cluster is a no-op.
/// Members without an embedding sort last.
pub fn order_cluster(
    members: Vec<String>,
    embeddings: &HashMap<String, EmbeddingVector>,
) -> Cluster {
    let member_vectors: Vec<&EmbeddingVector> = members
        .iter()
        .filter_map(|symbol| embeddings.get(symbol))
        .collect();

    let centroid = compute_centroid(&member_vectors)
        .unwrap_or_else(|| EmbeddingVector::new(Vec::new()));

    let mut scored: Vec<(String, f32)> = members
        .into_iter()
        .map(|symbol| {
            let similarity = embeddings
                .get(&symbol)
                .map(|vector| centroid.cosine_similarity(vector))
                .unwrap_or(f32::NEG_INFINITY);
            (symbol, similarity)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Cluster {
        members: scored.into_iter().map(|(symbol, _)| symbol).collect(),
        centroid,
    }
}
