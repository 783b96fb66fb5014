//! Deduplicated, immutable call graph.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{AtlasError, AtlasResult};

use super::model::{CallGraphInput, DocRange};

/// An outgoing call edge: the callee symbol plus the source range of the
/// call expression within the caller's document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEdge {
    pub symbol: String,
    pub call_site: DocRange,
}

/// One logical function node.
///
/// The qualified symbol is the sole identity key: a function referenced
/// from N call sites exists as one node reachable via N edges.
#[derive(Debug, Clone)]
pub struct CallGraphNode {
    pub symbol: String,
    pub document: String,
    pub range: DocRange,
    pub enclosing_range: DocRange,

    /// Ordered outgoing edges. Two edges may target the same symbol when a
    /// function is called from several sites within the same body.
    pub children: Vec<CallEdge>,
}

impl CallGraphNode {
    /// Distinct callee symbols, in first-occurrence order.
    pub fn child_symbols(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for edge in &self.children {
            if !seen.contains(&edge.symbol.as_str()) {
                seen.push(edge.symbol.as_str());
            }
        }
        seen
    }
}

/// Immutable in-memory call graph, deduplicated by symbol.
///
/// Constructed once from indexer output via [`CallGraph::load`]; no
/// mutation afterwards.
#[derive(Debug, Clone)]
pub struct CallGraph {
    nodes: HashMap<String, CallGraphNode>,
    roots: Vec<String>,
}

impl CallGraph {
    /// Builds the graph from raw indexer output.
    ///
    /// Every child reference must resolve to a definition record; a
    /// dangling reference fails the whole load with
    /// [`AtlasError::MalformedGraph`] before any node is exposed.
    pub fn load(input: CallGraphInput) -> AtlasResult<Self> {
        for (symbol, definition) in &input.definition_nodes {
            for child in &definition.children {
                if !input.definition_nodes.contains_key(&child.symbol) {
                    return Err(AtlasError::MalformedGraph {
                        parent: symbol.clone(),
                        child: child.symbol.clone(),
                    });
                }
            }
        }

        let nodes: HashMap<String, CallGraphNode> = input
            .definition_nodes
            .into_iter()
            .map(|(symbol, def)| {
                let node = CallGraphNode {
                    symbol: def.symbol,
                    document: def.document,
                    range: def.range,
                    enclosing_range: def.enclosing_range,
                    children: def
                        .children
                        .into_iter()
                        .map(|r| CallEdge {
                            symbol: r.symbol,
                            call_site: r.range,
                        })
                        .collect(),
                };
                (symbol, node)
            })
            .collect();

        let roots: Vec<String> = input
            .top_level_nodes
            .into_iter()
            .filter(|s| nodes.contains_key(s))
            .collect();

        debug!(nodes = nodes.len(), roots = roots.len(), "loaded call graph");

        Ok(Self { nodes, roots })
    }

    /// Looks up a node by symbol.
    pub fn node(&self, symbol: &str) -> Option<&CallGraphNode> {
        self.nodes.get(symbol)
    }

    /// Entry-point symbols.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// All node symbols, unordered.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// All nodes, unordered.
    pub fn nodes(&self) -> impl Iterator<Item = &CallGraphNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether an undirected call edge exists between the two symbols.
    pub fn connected(&self, a: &str, b: &str) -> bool {
        let forward = self
            .nodes
            .get(a)
            .map(|n| n.children.iter().any(|e| e.symbol == b))
            .unwrap_or(false);
        if forward {
            return true;
        }
        self.nodes
            .get(b)
            .map(|n| n.children.iter().any(|e| e.symbol == a))
            .unwrap_or(false)
    }
}
