//! Raw call-graph records as emitted by the external indexer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A half-open source range within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRange {
    pub start_line: usize,
    pub start_character: usize,
    pub end_line: usize,
    pub end_character: usize,
}

impl DocRange {
    pub fn new(start_line: usize, start_character: usize, end_line: usize, end_character: usize) -> Self {
        Self {
            start_line,
            start_character,
            end_line,
            end_character,
        }
    }

    /// Single-line range helper, mostly for tests.
    pub fn line(line: usize) -> Self {
        Self::new(line, 0, line, 0)
    }
}

/// A call reference from a definition to another symbol, with the source
/// range of the call expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRecord {
    pub symbol: String,
    pub range: DocRange,
}

/// One function definition: location metadata plus its ordered outgoing
/// call references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionRecord {
    pub symbol: String,

    /// Path of the defining document, relative to the repository root.
    pub document: String,

    /// Range of the function signature.
    pub range: DocRange,

    /// Range covering the full function body.
    pub enclosing_range: DocRange,

    /// Ordered outgoing call references.
    #[serde(default)]
    pub children: Vec<ReferenceRecord>,
}

/// The complete indexer output: entry-point symbols plus a symbol-keyed
/// definition map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallGraphInput {
    pub top_level_nodes: Vec<String>,
    pub definition_nodes: HashMap<String, DefinitionRecord>,
}
