//! Graph-aware clustering of summarized symbols.
//!
//! Combines two views of the codebase into one affinity: semantic cosine
//! similarity of summary embeddings, and structural call adjacency. The
//! fused matrix feeds a spectral clustering step whose cluster count is
//! chosen by a Calinski-Harabasz search.
//!
//! # Example
//!
//! ```ignore
//! use codeatlas::cluster::{ClusterConfig, ClusterPipeline};
//!
//! let pipeline = ClusterPipeline::new(embeddings, ClusterConfig::default());
//! let clusters = pipeline.cluster_summaries(&graph, &texts, &excluded).await?;
//! ```

pub mod config;
pub mod kmeans;
pub mod matrix;
pub mod order;
pub mod pipeline;
pub mod selector;
pub mod spectral;

// Re-exports
pub use config::{ClusterConfig, FusionWeights};
pub use order::{order_cluster, Cluster};
pub use pipeline::ClusterPipeline;
pub use selector::{calinski_harabasz, choose_cluster_count, MIN_NODES};
pub use spectral::spectral_cluster;
