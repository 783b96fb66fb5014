//! Memoized bottom-up traversal over the call graph.
//!
//! Walks the graph leaves-first, invoking the summarisation oracle exactly
//! once per distinct symbol. Children of a node run concurrently; a node's
//! own oracle call is only issued after every child has completed. The
//! driver is an explicit ready queue over dependency counts rather than
//! recursive suspension, so traversal depth is bounded by the graph size,
//! not the stack.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{AtlasError, AtlasResult};
use crate::graph::CallGraph;
use crate::models::Summary;

use super::annotate::annotated_code;
use super::provider::SummaryProvider;
use super::source::SourceProvider;

/// Bottom-up summarisation scheduler.
///
/// Oracle and source access are injected; the scheduler owns no global
/// state and one instance can drive multiple runs.
pub struct TraversalScheduler {
    provider: Arc<dyn SummaryProvider>,
    source: Arc<dyn SourceProvider>,
}

impl TraversalScheduler {
    pub fn new(provider: Arc<dyn SummaryProvider>, source: Arc<dyn SourceProvider>) -> Self {
        Self { provider, source }
    }

    /// Produces a complete symbol-to-summary map for the graph.
    ///
    /// Fails with [`AtlasError::CycleDetected`] before any oracle call if
    /// the graph is cyclic, with [`AtlasError::OracleResponseMalformed`] if
    /// a response violates the delimiter contract, and with
    /// [`AtlasError::OracleUnavailable`] on transport failure. Any failure
    /// aborts the whole run; no partial map is returned.
    pub async fn summarize_graph(&self, graph: &CallGraph) -> AtlasResult<HashMap<String, Summary>> {
        detect_cycle(graph)?;

        let children: HashMap<String, Vec<String>> = graph
            .nodes()
            .map(|n| {
                let distinct: Vec<String> =
                    n.child_symbols().into_iter().map(str::to_string).collect();
                (n.symbol.clone(), distinct)
            })
            .collect();

        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        let mut pending: HashMap<String, usize> = HashMap::new();
        for (symbol, child_symbols) in &children {
            pending.insert(symbol.clone(), child_symbols.len());
            for child in child_symbols {
                parents
                    .entry(child.clone())
                    .or_default()
                    .push(symbol.clone());
            }
        }

        let mut summaries: HashMap<String, Summary> = HashMap::new();
        let mut tasks: JoinSet<(String, anyhow::Result<String>)> = JoinSet::new();
        let mut first_error: Option<AtlasError> = None;

        let ready: Vec<String> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(symbol, _)| symbol.clone())
            .collect();

        info!(nodes = graph.len(), leaves = ready.len(), "starting traversal");

        for symbol in ready {
            self.spawn_node(graph, &summaries, &symbol, &mut tasks)?;
        }

        while let Some(joined) = tasks.join_next().await {
            let (symbol, response) = match joined {
                Ok(result) => result,
                Err(e) => {
                    first_error
                        .get_or_insert(AtlasError::OracleUnavailable(anyhow::Error::new(e)));
                    continue;
                }
            };

            if first_error.is_some() {
                // Drain remaining in-flight siblings; the run already failed.
                continue;
            }

            let summary = match response {
                Ok(text) => match Summary::parse(&symbol, &text) {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!(symbol = %symbol, "malformed oracle response");
                        first_error = Some(e);
                        continue;
                    }
                },
                Err(e) => {
                    warn!(symbol = %symbol, "oracle call failed");
                    first_error = Some(AtlasError::OracleUnavailable(e));
                    continue;
                }
            };

            debug!(symbol = %symbol, "node complete");
            summaries.insert(symbol.clone(), summary);

            for parent in parents.get(&symbol).map(Vec::as_slice).unwrap_or(&[]) {
                let count = pending
                    .get_mut(parent)
                    .expect("parent tracked in pending map");
                *count -= 1;
                if *count == 0 {
                    if let Err(e) = self.spawn_node(graph, &summaries, parent, &mut tasks) {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }

        info!(summaries = summaries.len(), "traversal complete");
        Ok(summaries)
    }

    /// Builds the annotated request for a node whose children are all
    /// complete, then launches its oracle call.
    fn spawn_node(
        &self,
        graph: &CallGraph,
        summaries: &HashMap<String, Summary>,
        symbol: &str,
        tasks: &mut JoinSet<(String, anyhow::Result<String>)>,
    ) -> AtlasResult<()> {
        let node = graph.node(symbol).expect("scheduled symbol exists in graph");
        let code = annotated_code(node, summaries, self.source.as_ref())?;

        let provider = Arc::clone(&self.provider);
        let symbol = symbol.to_string();
        tasks.spawn(async move {
            let response = provider.summarize(&code).await;
            (symbol, response)
        });

        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Iterative DFS cycle check with an explicit active-ancestor stack.
///
/// Runs before any oracle call so a cyclic graph fails fast instead of
/// deadlocking a node on its own completion.
fn detect_cycle(graph: &CallGraph) -> AtlasResult<()> {
    let mut marks: HashMap<String, Mark> = graph
        .symbols()
        .map(|s| (s.to_string(), Mark::White))
        .collect();

    let children: HashMap<String, Vec<String>> = graph
        .nodes()
        .map(|n| {
            (
                n.symbol.clone(),
                n.child_symbols().into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

    let starts: Vec<String> = marks.keys().cloned().collect();
    for start in starts {
        if marks[&start] != Mark::White {
            continue;
        }

        // Frames of (symbol, next child index); the stack itself is the
        // active ancestor chain.
        let mut stack: Vec<(String, usize)> = vec![(start.clone(), 0)];
        marks.insert(start, Mark::Gray);

        while let Some(frame) = stack.last_mut() {
            let symbol = frame.0.clone();
            let child_symbols = &children[&symbol];

            if frame.1 < child_symbols.len() {
                let child = child_symbols[frame.1].clone();
                frame.1 += 1;

                match marks[&child] {
                    Mark::White => {
                        marks.insert(child.clone(), Mark::Gray);
                        stack.push((child, 0));
                    }
                    Mark::Gray => {
                        let pos = stack
                            .iter()
                            .position(|(s, _)| *s == child)
                            .expect("gray symbol is on the active stack");
                        let mut cycle: Vec<String> =
                            stack[pos..].iter().map(|(s, _)| s.clone()).collect();
                        cycle.push(child);
                        return Err(AtlasError::CycleDetected { cycle });
                    }
                    Mark::Black => {}
                }
            } else {
                marks.insert(symbol, Mark::Black);
                stack.pop();
            }
        }
    }

    Ok(())
}
