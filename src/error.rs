//! Crate-wide error taxonomy.

use thiserror::Error;

/// Errors produced by the summarisation traversal and the clustering
/// pipeline.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// A child reference points at a symbol with no definition record.
    #[error("malformed graph: `{parent}` references undefined symbol `{child}`")]
    MalformedGraph { parent: String, child: String },

    /// The call graph contains a cycle; the offending symbols are listed in
    /// traversal order, first symbol repeated at the end.
    #[error("cycle detected in call graph: {}", cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    /// An oracle response did not contain the two-part delimiter exactly
    /// once.
    #[error("malformed oracle response for `{symbol}`: found {occurrences} occurrences of the `---` delimiter")]
    OracleResponseMalformed { symbol: String, occurrences: usize },

    /// Transport or timeout failure from the summarisation or embedding
    /// oracle.
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(#[source] anyhow::Error),

    /// Too few symbols for a meaningful cluster-count search.
    #[error("insufficient nodes for clustering: got {got}, need at least {need}")]
    InsufficientNodes { got: usize, need: usize },

    /// Source text for a node's document could not be read.
    #[error("source unavailable for document `{document}`: {reason}")]
    SourceUnavailable { document: String, reason: String },
}

/// Result alias used throughout the core modules.
pub type AtlasResult<T> = Result<T, AtlasError>;
