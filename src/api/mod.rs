//! HTTP API.
//!
//! Two endpoints: `GET /health` and `POST /cluster`. The cluster endpoint
//! takes the summaries produced by the traversal pass and returns an
//! ordered partition of the symbols.

pub mod error;
pub mod routes;
pub mod types;

// Re-exports
pub use error::ApiError;
pub use routes::{create_router, AppState, SharedState};
pub use types::{ClusterRequest, ClusterResponse, ClusterView, HealthResponse};
