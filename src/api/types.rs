//! API request and response types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Request to cluster previously summarized symbols.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRequest {
    /// Symbol to summary text, as produced by the summarization pass.
    pub refined_function_summaries: HashMap<String, String>,

    /// Symbols to leave out of the clustering.
    #[serde(default)]
    pub filtered_out_nodes: Vec<String>,
}

/// One cluster of symbols, most representative first.
#[derive(Debug, Serialize)]
pub struct ClusterView {
    pub members: Vec<String>,

    /// Short display labels parallel to `members`.
    pub labels: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResponse {
    pub success: bool,
    pub clusters: Vec<ClusterView>,
    pub node_count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
