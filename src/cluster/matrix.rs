//! Matrix construction for graph-aware clustering.
//!
//! Three matrices over the same symbol ordering: pairwise cosine similarity
//! of summary embeddings, symmetric 0/1 call adjacency, and their weighted
//! fusion after L1 row normalization.

use std::collections::HashMap;

use ndarray::Array2;

use crate::graph::CallGraph;
use crate::models::EmbeddingVector;

use super::config::FusionWeights;

/// Pairwise cosine similarity matrix with a zero diagonal.
///
/// `vectors` must be parallel to the symbol ordering used elsewhere in the
/// pipeline.
pub fn similarity_matrix(vectors: &[&EmbeddingVector]) -> Array2<f64> {
    let n = vectors.len();
    let mut matrix = Array2::zeros((n, n));

    for i in 0..n {
        for j in (i + 1)..n {
            let sim = vectors[i].cosine_similarity(vectors[j]) as f64;
            matrix[[i, j]] = sim;
            matrix[[j, i]] = sim;
        }
    }

    matrix
}

/// Symmetric 0/1 adjacency matrix over `symbols` from the call graph.
///
/// An entry is 1 when either symbol calls the other. Self-loops are not
/// recorded on the diagonal.
pub fn adjacency_matrix(symbols: &[String], graph: &CallGraph) -> Array2<f64> {
    let n = symbols.len();
    let index: HashMap<&str, usize> = symbols
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();

    let mut matrix = Array2::zeros((n, n));

    for (i, symbol) in symbols.iter().enumerate() {
        let Some(node) = graph.node(symbol) else {
            continue;
        };
        for child in node.child_symbols() {
            let Some(&j) = index.get(child) else {
                continue;
            };
            if i == j {
                continue;
            }
            matrix[[i, j]] = 1.0;
            matrix[[j, i]] = 1.0;
        }
    }

    matrix
}

/// Normalizes each row to unit L1 mass. All-zero rows stay zero.
pub fn row_normalize_l1(matrix: &Array2<f64>) -> Array2<f64> {
    let mut normalized = matrix.clone();

    for mut row in normalized.rows_mut() {
        let sum: f64 = row.iter().map(|v| v.abs()).sum();
        if sum > 0.0 {
            row.mapv_inplace(|v| v / sum);
        }
    }

    normalized
}

/// Weighted elementwise fusion of the row-normalized adjacency and
/// similarity matrices.
pub fn fuse(
    adjacency_norm: &Array2<f64>,
    similarity_norm: &Array2<f64>,
    weights: &FusionWeights,
) -> Array2<f64> {
    adjacency_norm * weights.adjacency + similarity_norm * weights.similarity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CallGraphInput, DefinitionRecord, DocRange, ReferenceRecord};

    fn unit(values: Vec<f32>) -> EmbeddingVector {
        EmbeddingVector::new(values)
    }

    fn graph_with_edges(edges: &[(&str, &str)], symbols: &[&str]) -> CallGraph {
        let mut definition_nodes = std::collections::HashMap::new();
        for symbol in symbols {
            let children: Vec<ReferenceRecord> = edges
                .iter()
                .filter(|(parent, _)| parent == symbol)
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
        CallGraph::load(CallGraphInput {
            top_level_nodes: vec![symbols[0].to_string()],
            definition_nodes,
        })
        .unwrap()
    }

    #[test]
    fn test_similarity_matrix_symmetric_zero_diagonal() {
        let a = unit(vec![1.0, 0.0]);
        let b = unit(vec![0.0, 1.0]);
        let c = unit(vec![1.0, 0.0]);

        let matrix = similarity_matrix(&[&a, &b, &c]);

        assert_eq!(matrix[[0, 0]], 0.0);
        assert_eq!(matrix[[1, 1]], 0.0);
        assert!((matrix[[0, 1]] - 0.0).abs() < 1e-6);
        assert!((matrix[[0, 2]] - 1.0).abs() < 1e-6);
        assert_eq!(matrix[[0, 2]], matrix[[2, 0]]);
    }

    #[test]
    fn test_adjacency_symmetric() {
        let graph = graph_with_edges(&[("a", "b"), ("b", "c")], &["a", "b", "c"]);
        let symbols: Vec<String> = vec!["a".into(), "b".into(), "c".into()];

        let matrix = adjacency_matrix(&symbols, &graph);

        assert_eq!(matrix[[0, 1]], 1.0);
        assert_eq!(matrix[[1, 0]], 1.0);
        assert_eq!(matrix[[1, 2]], 1.0);
        assert_eq!(matrix[[2, 1]], 1.0);
        assert_eq!(matrix[[0, 2]], 0.0);
        assert_eq!(matrix[[0, 0]], 0.0);
    }

    #[test]
    fn test_adjacency_ignores_symbols_outside_set() {
        let graph = graph_with_edges(&[("a", "b"), ("a", "c")], &["a", "b", "c"]);
        let symbols: Vec<String> = vec!["a".into(), "b".into()];

        let matrix = adjacency_matrix(&symbols, &graph);

        assert_eq!(matrix.dim(), (2, 2));
        assert_eq!(matrix[[0, 1]], 1.0);
    }

    #[test]
    fn test_row_normalize_l1() {
        let matrix = ndarray::arr2(&[[0.0, 2.0, 2.0], [1.0, 0.0, 3.0], [0.0, 0.0, 0.0]]);

        let normalized = row_normalize_l1(&matrix);

        assert!((normalized[[0, 1]] - 0.5).abs() < 1e-12);
        assert!((normalized[[1, 0]] - 0.25).abs() < 1e-12);
        assert!((normalized[[1, 2]] - 0.75).abs() < 1e-12);
        // zero row preserved, not NaN
        assert_eq!(normalized[[2, 0]], 0.0);
        assert_eq!(normalized[[2, 2]], 0.0);
    }

    #[test]
    fn test_fusion_weights() {
        let a = ndarray::arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        let s = ndarray::arr2(&[[0.0, 0.5], [0.5, 0.0]]);

        let fused = fuse(&a, &s, &FusionWeights::default());

        assert!((fused[[0, 1]] - 0.75).abs() < 1e-12);

        let fused = fuse(
            &a,
            &s,
            &FusionWeights {
                adjacency: 1.0,
                similarity: 0.0,
            },
        );
        assert!((fused[[0, 1]] - 1.0).abs() < 1e-12);
    }
}
