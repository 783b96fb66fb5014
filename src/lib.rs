//! CodeAtlas: call-graph summarization and clustering.
//!
//! Walks a static call graph bottom-up, summarizing every function with an
//! LLM so that each parent is summarized with its children's summaries
//! inlined at the call sites, then groups the summarized symbols with a
//! graph-aware spectral clustering over summary embeddings.
//!
//! # Architecture
//!
//! - `graph`: call graph model, loading and validation
//! - `summarize`: memoized bottom-up traversal against a summary oracle
//! - `embeddings`: batch embedding of summaries behind a provider trait
//! - `cluster`: matrix fusion, cluster-count search, spectral clustering
//! - `cache`: fingerprint-keyed result caching
//! - `api`: HTTP surface for the clustering stage

pub mod api;
pub mod cache;
pub mod cluster;
pub mod embeddings;
pub mod error;
pub mod graph;
pub mod models;
pub mod summarize;

// Re-exports of the main entry points
pub use cluster::{Cluster, ClusterConfig, ClusterPipeline};
pub use embeddings::EmbeddingService;
pub use error::{AtlasError, AtlasResult};
pub use graph::CallGraph;
pub use summarize::TraversalScheduler;
