//! In-memory caching.

pub mod cluster_cache;
pub mod lru;

// Re-exports
pub use cluster_cache::{cluster_fingerprint, ClusterCache};
pub use lru::LruCache;
