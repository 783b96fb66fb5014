//! Call graph model.
//!
//! Immutable in-memory representation of an extracted call graph: function
//! nodes keyed by qualified symbol, their source locations, and directed
//! call edges. Re-converging paths (a function called from several sites)
//! map to one logical node.

pub mod call_graph;
pub mod model;

// Re-exports
pub use call_graph::{CallEdge, CallGraph, CallGraphNode};
pub use model::{CallGraphInput, DefinitionRecord, DocRange, ReferenceRecord};
