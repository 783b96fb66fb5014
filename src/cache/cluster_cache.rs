//! Fingerprint-keyed cache of clustering results.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::cluster::{Cluster, FusionWeights};

use super::lru::LruCache;

const DEFAULT_CAPACITY: usize = 128;

/// Caches cluster partitions by a fingerprint of the inputs that determine
/// them: the included summary texts and the fusion weights.
///
/// The pipeline is deterministic for a fixed seed, so equal fingerprints
/// mean equal output.
pub struct ClusterCache {
    entries: LruCache<String, Vec<Cluster>>,
}

impl ClusterCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn get(&self, fingerprint: &str) -> Option<Vec<Cluster>> {
        let hit = self.entries.get(&fingerprint.to_string());
        if hit.is_some() {
            debug!(fingerprint, "cluster cache hit");
        }
        hit
    }

    pub fn put(&self, fingerprint: String, clusters: Vec<Cluster>) {
        self.entries.put(fingerprint, clusters);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        self.entries.stats()
    }
}

impl Default for ClusterCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Content fingerprint of a clustering request.
///
/// The text map is iterated in key order, so insertion order never changes
/// the fingerprint.
pub fn cluster_fingerprint(texts: &BTreeMap<String, String>, weights: &FusionWeights) -> String {
    let mut hasher = DefaultHasher::new();
    for (symbol, text) in texts {
        symbol.hash(&mut hasher);
        text.hash(&mut hasher);
    }
    weights.adjacency.to_bits().hash(&mut hasher);
    weights.similarity.to_bits().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmbeddingVector;

    fn texts(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fingerprint_stable() {
        let a = texts(&[("f", "one"), ("g", "two")]);
        let b = texts(&[("g", "two"), ("f", "one")]);

        let weights = FusionWeights::default();
        assert_eq!(
            cluster_fingerprint(&a, &weights),
            cluster_fingerprint(&b, &weights)
        );
    }

    #[test]
    fn test_fingerprint_sensitive_to_content_and_weights() {
        let base = texts(&[("f", "one")]);
        let changed = texts(&[("f", "two")]);
        let weights = FusionWeights::default();

        assert_ne!(
            cluster_fingerprint(&base, &weights),
            cluster_fingerprint(&changed, &weights)
        );

        let other_weights = FusionWeights {
            adjacency: 0.7,
            similarity: 0.3,
        };
        assert_ne!(
            cluster_fingerprint(&base, &weights),
            cluster_fingerprint(&base, &other_weights)
        );
    }

    #[test]
    fn test_cache_round_trip() {
        let cache = ClusterCache::new(8);
        let clusters = vec![Cluster {
            members: vec!["f".to_string()],
            centroid: EmbeddingVector::new(vec![1.0, 0.0]),
        }];

        assert!(cache.get("abc").is_none());
        cache.put("abc".to_string(), clusters.clone());

        let cached = cache.get("abc").unwrap();
        assert_eq!(cached[0].members, clusters[0].members);
        assert_eq!(cache.stats(), (1, 1));
    }
}
