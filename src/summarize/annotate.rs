//! Oracle request construction: source slicing and call-site annotation.

use std::collections::HashMap;

use crate::error::AtlasResult;
use crate::graph::CallGraphNode;
use crate::models::Summary;

use super::source::SourceProvider;

/// Builds the annotated code block for one node.
///
/// For each child call site, the child's two-part summary is inserted
/// directly above the call expression as two annotation lines:
///
/// ```text
/// ---bl: <business summary>
/// ---imp: <implementation summary>
/// <original call line>
/// ```
///
/// The result is the node's enclosing range sliced from the document, with
/// the annotations in place.
pub fn annotated_code(
    node: &CallGraphNode,
    child_summaries: &HashMap<String, Summary>,
    source: &dyn SourceProvider,
) -> AtlasResult<String> {
    let mut lines = source.document_lines(&node.document)?;

    for edge in &node.children {
        let Some(summary) = child_summaries.get(&edge.symbol) else {
            continue;
        };
        let call_line = edge.call_site.start_line;
        if call_line >= lines.len() {
            continue;
        }
        lines[call_line] = format!(
            "---bl: {}\n---imp: {}\n{}",
            summary.business, summary.implementation, lines[call_line]
        );
    }

    let start = node.enclosing_range.start_line.min(lines.len());
    let end = (node.enclosing_range.end_line + 1).min(lines.len());

    Ok(lines[start..end].join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CallEdge, DocRange};
    use crate::summarize::source::InMemorySource;

    fn node_with_children(children: Vec<CallEdge>) -> CallGraphNode {
        CallGraphNode {
            symbol: "app.run".to_string(),
            document: "app.py".to_string(),
            range: DocRange::line(0),
            enclosing_range: DocRange::new(0, 0, 3, 0),
            children,
        }
    }

    fn source() -> InMemorySource {
        InMemorySource::new().with_document(
            "app.py",
            "def run():\n    setup()\n    process()\n    return",
        )
    }

    #[test]
    fn test_annotates_call_sites() {
        let node = node_with_children(vec![
            CallEdge {
                symbol: "app.setup".to_string(),
                call_site: DocRange::line(1),
            },
            CallEdge {
                symbol: "app.process".to_string(),
                call_site: DocRange::line(2),
            },
        ]);

        let mut summaries = HashMap::new();
        summaries.insert(
            "app.setup".to_string(),
            Summary::new("Prepares the environment.", "Reads config files."),
        );
        summaries.insert(
            "app.process".to_string(),
            Summary::new("Processes the batch.", "Iterates over records."),
        );

        let code = annotated_code(&node, &summaries, &source()).unwrap();

        assert!(code.contains("---bl: Prepares the environment.\n---imp: Reads config files.\n    setup()"));
        assert!(code.contains("---bl: Processes the batch."));
        // Slice covers the enclosing range.
        assert!(code.starts_with("def run():"));
        assert!(code.ends_with("    return"));
    }

    #[test]
    fn test_leaf_node_unannotated() {
        let node = node_with_children(vec![]);
        let code = annotated_code(&node, &HashMap::new(), &source()).unwrap();
        assert!(!code.contains("---bl:"));
        assert!(code.contains("    process()"));
    }

    #[test]
    fn test_out_of_bounds_call_site_skipped() {
        let node = node_with_children(vec![CallEdge {
            symbol: "app.setup".to_string(),
            call_site: DocRange::line(99),
        }]);

        let mut summaries = HashMap::new();
        summaries.insert("app.setup".to_string(), Summary::new("x", "y"));

        let code = annotated_code(&node, &summaries, &source()).unwrap();
        assert!(!code.contains("---bl:"));
    }
}
