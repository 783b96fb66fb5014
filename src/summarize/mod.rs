//! Bottom-up call graph summarisation.
//!
//! This module provides:
//! - **TraversalScheduler**: memoized bottom-up traversal, one oracle call
//!   per distinct symbol
//! - **SummaryProvider**: oracle backend trait (OpenAI-compatible, mock)
//! - **SourceProvider**: repository source access (filesystem, in-memory)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use codeatlas::summarize::{FsSourceProvider, OpenAiSummaryProvider, TraversalScheduler};
//!
//! let provider = Arc::new(OpenAiSummaryProvider::from_env()?);
//! let source = Arc::new(FsSourceProvider::new("/path/to/repo"));
//! let scheduler = TraversalScheduler::new(provider, source);
//! let summaries = scheduler.summarize_graph(&graph).await?;
//! ```

pub mod annotate;
pub mod config;
pub mod mock_provider;
pub mod openai_provider;
pub mod provider;
pub mod scheduler;
pub mod source;

// Re-exports
pub use annotate::annotated_code;
pub use config::SummarizeConfig;
pub use mock_provider::MockSummaryProvider;
pub use openai_provider::OpenAiSummaryProvider;
pub use provider::{build_prompt, SummaryProvider};
pub use scheduler::TraversalScheduler;
pub use source::{FsSourceProvider, InMemorySource, SourceProvider};
