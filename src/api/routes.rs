//! HTTP routes and handlers.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cluster::ClusterPipeline;
use crate::graph::CallGraph;
use crate::models::display_name;

use super::error::ApiError;
use super::types::{ClusterRequest, ClusterResponse, ClusterView, HealthResponse};

/// Shared application state.
pub struct AppState {
    pub graph: Arc<CallGraph>,
    pub pipeline: Arc<ClusterPipeline>,
}

pub type SharedState = Arc<AppState>;

/// Builds the API router.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cluster", post(cluster))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /cluster
///
/// Clusters the supplied symbol summaries against the loaded call graph.
async fn cluster(
    State(state): State<SharedState>,
    Json(request): Json<ClusterRequest>,
) -> Result<Json<ClusterResponse>, ApiError> {
    let texts: BTreeMap<String, String> = request
        .refined_function_summaries
        .into_iter()
        .collect();
    let excluded: HashSet<String> = request.filtered_out_nodes.into_iter().collect();

    info!(
        summaries = texts.len(),
        excluded = excluded.len(),
        "cluster request received"
    );

    let clusters = state
        .pipeline
        .cluster_summaries(&state.graph, &texts, &excluded)
        .await?;

    let node_count = clusters.iter().map(|c| c.len()).sum();
    let views = clusters
        .into_iter()
        .map(|cluster| ClusterView {
            labels: cluster
                .members
                .iter()
                .map(|symbol| display_name(symbol))
                .collect(),
            members: cluster.members,
        })
        .collect();

    Ok(Json(ClusterResponse {
        success: true,
        clusters: views,
        node_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterConfig;
    use crate::embeddings::{EmbeddingConfig, EmbeddingService, MockEmbeddingProvider};
    use crate::graph::{CallGraphInput, DefinitionRecord, DocRange, ReferenceRecord};
    use std::collections::HashMap;

    fn test_state() -> SharedState {
        let symbols = ["a", "b", "c", "d", "e", "f"];
        let edges = [("a", "b"), ("b", "c"), ("d", "e"), ("e", "f")];

        let mut definition_nodes = HashMap::new();
        for symbol in symbols {
            let children: Vec<ReferenceRecord> = edges
                .iter()
                .filter(|(parent, _)| *parent == symbol)
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
        let graph = CallGraph::load(CallGraphInput {
            top_level_nodes: vec!["a".to_string(), "d".to_string()],
            definition_nodes,
        })
        .unwrap();

        let service = EmbeddingService::new(
            Arc::new(MockEmbeddingProvider::new(8)),
            EmbeddingConfig::default(),
        );
        let pipeline = ClusterPipeline::new(Arc::new(service), ClusterConfig::default());

        Arc::new(AppState {
            graph: Arc::new(graph),
            pipeline: Arc::new(pipeline),
        })
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health().await;
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_cluster_handler_partitions_input() {
        let state = test_state();
        let request = ClusterRequest {
            refined_function_summaries: ["a", "b", "c", "d", "e", "f"]
                .iter()
                .map(|s| (s.to_string(), format!("summary of {s}")))
                .collect(),
            filtered_out_nodes: Vec::new(),
        };

        let response = cluster(State(state), Json(request)).await.unwrap();
        assert!(response.success);
        assert_eq!(response.node_count, 6);

        let mut all: Vec<String> = response
            .clusters
            .iter()
            .flat_map(|c| c.members.iter().cloned())
            .collect();
        all.sort();
        assert_eq!(all, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[tokio::test]
    async fn test_cluster_handler_rejects_small_input() {
        let state = test_state();
        let request = ClusterRequest {
            refined_function_summaries: [("a".to_string(), "only one".to_string())]
                .into_iter()
                .collect(),
            filtered_out_nodes: Vec::new(),
        };

        let err = cluster(State(state), Json(request)).await.unwrap_err();
        assert!(matches!(err, ApiError::Unprocessable(_)));
    }
}
