//! Core data types shared across the summarisation and clustering stages.

pub mod embedding;
pub mod summary;
pub mod symbol;

// Re-exports
pub use embedding::{compute_centroid, EmbeddingVector};
pub use summary::{Summary, SUMMARY_DELIMITER};
pub use symbol::{display_name, repo_local_name};
