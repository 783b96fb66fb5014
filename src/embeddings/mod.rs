//! Embedding oracle adapter.
//!
//! Symbol-keyed batch embedding of summaries through a provider trait:
//! - OpenAI-compatible HTTP backend
//! - Mock provider (for testing)
//!
//! # Example
//!
//! ```ignore
//! use codeatlas::embeddings::{EmbeddingConfig, EmbeddingService};
//!
//! let service = EmbeddingService::with_mock(1536);
//! let vectors = service.embed_keyed(&summary_texts).await?;
//! ```

pub mod config;
pub mod mock_provider;
pub mod openai_provider;
pub mod provider;
pub mod service;

// Re-exports
pub use config::EmbeddingConfig;
pub use mock_provider::MockEmbeddingProvider;
pub use openai_provider::OpenAiEmbeddingProvider;
pub use provider::EmbeddingProvider;
pub use service::EmbeddingService;
