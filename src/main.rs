//! CodeAtlas service binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use codeatlas::api::{create_router, AppState};
use codeatlas::cluster::{ClusterConfig, ClusterPipeline};
use codeatlas::embeddings::{EmbeddingConfig, EmbeddingService, OpenAiEmbeddingProvider};
use codeatlas::graph::{CallGraph, CallGraphInput};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting codeatlas v{}", env!("CARGO_PKG_VERSION"));

    let graph_path =
        std::env::var("CALL_GRAPH_PATH").unwrap_or_else(|_| "call_graph.json".to_string());
    let raw = tokio::fs::read_to_string(&graph_path)
        .await
        .with_context(|| format!("failed to read call graph from {graph_path}"))?;
    let input: CallGraphInput =
        serde_json::from_str(&raw).with_context(|| format!("invalid call graph in {graph_path}"))?;
    let graph = CallGraph::load(input)?;
    info!(nodes = graph.len(), path = %graph_path, "call graph loaded");

    let provider = OpenAiEmbeddingProvider::from_env()?;
    let embeddings = EmbeddingService::new(Arc::new(provider), EmbeddingConfig::from_env());
    let pipeline = ClusterPipeline::new(Arc::new(embeddings), ClusterConfig::default());

    let state = Arc::new(AppState {
        graph: Arc::new(graph),
        pipeline: Arc::new(pipeline),
    });
    let app = create_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .context("invalid PORT")?;
    let addr: SocketAddr = format!("{host}:{port}").parse().context("invalid HOST")?;

    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
