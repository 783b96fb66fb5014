//! End-to-end clustering pipeline.
//!
//! Summary texts in, ordered clusters out: embed the included summaries,
//! build the fused affinity over the call graph, search for a cluster
//! count, run spectral clustering, and order each cluster around its
//! centroid. Results are cached by input fingerprint.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{cluster_fingerprint, ClusterCache};
use crate::embeddings::EmbeddingService;
use crate::error::{AtlasError, AtlasResult};
use crate::graph::CallGraph;
use crate::models::{EmbeddingVector, Summary};

use super::config::ClusterConfig;
use super::matrix::{adjacency_matrix, fuse, row_normalize_l1, similarity_matrix};
use super::order::{order_cluster, Cluster};
use super::selector::{choose_cluster_count, MIN_NODES};
use super::spectral::spectral_cluster;

pub struct ClusterPipeline {
    embeddings: Arc<EmbeddingService>,
    cache: Arc<ClusterCache>,
    config: ClusterConfig,
}

impl ClusterPipeline {
    pub fn new(embeddings: Arc<EmbeddingService>, config: ClusterConfig) -> Self {
        Self {
            embeddings,
            cache: Arc::new(ClusterCache::default()),
            config,
        }
    }

    /// Builder: share a cache across pipelines.
    pub fn with_cache(mut self, cache: Arc<ClusterCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &ClusterCache {
        &self.cache
    }

    /// The text embedded for each summarized symbol: its business intent.
    pub fn embedding_texts(summaries: &HashMap<String, Summary>) -> BTreeMap<String, String> {
        summaries
            .iter()
            .map(|(symbol, summary)| (symbol.clone(), summary.business.clone()))
            .collect()
    }

    /// Clusters the summarized symbols of `graph`, skipping `excluded`.
    ///
    /// The returned clusters partition exactly the included symbols; no
    /// cluster is empty. Symbols excluded or absent from `texts` never
    /// appear in the output.
    pub async fn cluster_summaries(
        &self,
        graph: &CallGraph,
        texts: &BTreeMap<String, String>,
        excluded: &HashSet<String>,
    ) -> AtlasResult<Vec<Cluster>> {
        let included: BTreeMap<String, String> = texts
            .iter()
            .filter(|(symbol, _)| !excluded.contains(*symbol))
            .map(|(symbol, text)| (symbol.clone(), text.clone()))
            .collect();

        if included.len() < MIN_NODES {
            return Err(AtlasError::InsufficientNodes {
                got: included.len(),
                need: MIN_NODES,
            });
        }

        let fingerprint = cluster_fingerprint(&included, &self.config.weights);
        if let Some(cached) = self.cache.get(&fingerprint) {
            return Ok(cached);
        }

        let embedded = self
            .embeddings
            .embed_keyed(&included)
            .await
            .map_err(AtlasError::OracleUnavailable)?;

        let symbols: Vec<String> = included.keys().cloned().collect();
        let mut vectors: Vec<&EmbeddingVector> = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            let vector = embedded.get(symbol).ok_or_else(|| {
                AtlasError::OracleUnavailable(anyhow::anyhow!(
                    "embedding missing for symbol {symbol}"
                ))
            })?;
            vectors.push(vector);
        }

        let similarity = similarity_matrix(&vectors);
        let adjacency = adjacency_matrix(&symbols, graph);
        let fused = fuse(
            &row_normalize_l1(&adjacency),
            &row_normalize_l1(&similarity),
            &self.config.weights,
        );

        let k = choose_cluster_count(&fused, &similarity, &self.config)?;
        let labels = spectral_cluster(&fused, k, &self.config);

        debug!(nodes = symbols.len(), k, "spectral clustering complete");

        let mut groups: Vec<Vec<String>> = vec![Vec::new(); k];
        for (symbol, &label) in symbols.iter().zip(labels.iter()) {
            groups[label].push(symbol.clone());
        }

        let clusters: Vec<Cluster> = groups
            .into_iter()
            .filter(|members| !members.is_empty())
            .map(|members| order_cluster(members, &embedded))
            .collect();

        info!(
            nodes = symbols.len(),
            clusters = clusters.len(),
            "clustering pipeline finished"
        );

        self.cache.put(fingerprint, clusters.clone());
        Ok(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{EmbeddingConfig, MockEmbeddingProvider};
    use crate::graph::{CallGraphInput, DefinitionRecord, DocRange, ReferenceRecord};

    fn graph(edges: &[(&str, &str)], symbols: &[&str]) -> CallGraph {
        let mut definition_nodes = std::collections::HashMap::new();
        for symbol in symbols {
            let children: Vec<ReferenceRecord> = edges
                .iter()
                .filter(|(parent, _)| parent == symbol)
                .map(|(_, child)| ReferenceRecord {
                    symbol: child.to_string(),
                    range: DocRange::line(1),
                })
                .collect();
            definition_nodes.insert(
                symbol.to_string(),
                DefinitionRecord {
                    symbol: symbol.to_string(),
                    document: format!("{symbol}.py"),
                    range: DocRange::line(0),
                    enclosing_range: DocRange::new(0, 0, 2, 0),
                    children,
                },
            );
        }
        CallGraph::load(CallGraphInput {
            top_level_nodes: vec![symbols[0].to_string()],
            definition_nodes,
        })
        .unwrap()
    }

    /// Two semantic groups of three, pinned so the mock embeddings carry
    /// the intended similarity structure.
    fn pipeline_for_two_groups() -> (ClusterPipeline, BTreeMap<String, String>) {
        let provider = MockEmbeddingProvider::new(3)
            .with_vector_for("reads config", vec![1.0, 0.0, 0.0])
            .with_vector_for("parses config", vec![0.9, 0.1, 0.0])
            .with_vector_for("loads config", vec![0.95, 0.05, 0.0])
            .with_vector_for("sends email", vec![0.0, 1.0, 0.0])
            .with_vector_for("formats email", vec![0.0, 0.9, 0.1])
            .with_vector_for("queues email", vec![0.0, 0.95, 0.05]);

        let service = EmbeddingService::new(Arc::new(provider), EmbeddingConfig::default());
        let pipeline = ClusterPipeline::new(Arc::new(service), ClusterConfig::default());

        let texts: BTreeMap<String, String> = [
            ("cfg_read", "reads config"),
            ("cfg_parse", "parses config"),
            ("cfg_load", "loads config"),
            ("mail_send", "sends email"),
            ("mail_fmt", "formats email"),
            ("mail_queue", "queues email"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        (pipeline, texts)
    }

    fn two_group_graph() -> CallGraph {
        graph(
            &[
                ("cfg_read", "cfg_parse"),
                ("cfg_parse", "cfg_load"),
                ("mail_send", "mail_fmt"),
                ("mail_fmt", "mail_queue"),
            ],
            &[
                "cfg_read",
                "cfg_parse",
                "cfg_load",
                "mail_send",
                "mail_fmt",
                "mail_queue",
            ],
        )
    }

    #[tokio::test]
    async fn test_partitions_into_two_groups() {
        let (pipeline, texts) = pipeline_for_two_groups();
        let graph = two_group_graph();

        let clusters = pipeline
            .cluster_summaries(&graph, &texts, &HashSet::new())
            .await
            .unwrap();

        assert_eq!(clusters.len(), 2);

        let mut all: Vec<String> = clusters
            .iter()
            .flat_map(|c| c.members.iter().cloned())
            .collect();
        all.sort();
        let mut expected: Vec<String> = texts.keys().cloned().collect();
        expected.sort();
        assert_eq!(all, expected);

        for cluster in &clusters {
            assert!(!cluster.is_empty());
            let cfg = cluster.members.iter().filter(|m| m.starts_with("cfg")).count();
            assert!(cfg == 0 || cfg == cluster.len(), "mixed cluster: {cluster:?}");
        }
    }

    #[tokio::test]
    async fn test_excluded_symbols_never_appear() {
        let (pipeline, mut texts) = pipeline_for_two_groups();
        texts.insert("extra_a".to_string(), "reads config".to_string());
        texts.insert("extra_b".to_string(), "sends email".to_string());
        let graph = two_group_graph();

        let excluded: HashSet<String> =
            ["extra_a".to_string(), "extra_b".to_string()].into_iter().collect();

        let clusters = pipeline
            .cluster_summaries(&graph, &texts, &excluded)
            .await
            .unwrap();

        for cluster in &clusters {
            assert!(!cluster.members.iter().any(|m| m.starts_with("extra")));
        }
    }

    #[tokio::test]
    async fn test_too_few_nodes() {
        let (pipeline, _) = pipeline_for_two_groups();
        let graph = graph(&[], &["a", "b", "c"]);
        let texts: BTreeMap<String, String> = [("a", "x"), ("b", "y"), ("c", "z")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let err = pipeline
            .cluster_summaries(&graph, &texts, &HashSet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AtlasError::InsufficientNodes { got: 3, need: 6 }));
    }

    #[tokio::test]
    async fn test_repeat_request_hits_cache() {
        let (pipeline, texts) = pipeline_for_two_groups();
        let graph = two_group_graph();

        let first = pipeline
            .cluster_summaries(&graph, &texts, &HashSet::new())
            .await
            .unwrap();
        let second = pipeline
            .cluster_summaries(&graph, &texts, &HashSet::new())
            .await
            .unwrap();

        assert_eq!(
            first.iter().map(|c| &c.members).collect::<Vec<_>>(),
            second.iter().map(|c| &c.members).collect::<Vec<_>>()
        );
        let (hits, _) = pipeline.cache().stats();
        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_oracle_unavailable() {
        let provider = MockEmbeddingProvider::new(3).should_fail(true);
        let service = EmbeddingService::new(Arc::new(provider), EmbeddingConfig::default());
        let pipeline = ClusterPipeline::new(Arc::new(service), ClusterConfig::default());

        let graph = two_group_graph();
        let texts: BTreeMap<String, String> = (0..6)
            .map(|i| (format!("s{i}"), format!("text {i}")))
            .collect();

        let err = pipeline
            .cluster_summaries(&graph, &texts, &HashSet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AtlasError::OracleUnavailable(_)));
    }
}
