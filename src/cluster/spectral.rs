//! Spectral clustering over a precomputed affinity matrix.
//!
//! Symmetric normalization of the affinity, Jacobi eigendecomposition, then
//! seeded k-means over the row-normalized leading eigenvectors.

use ndarray::Array2;

use super::config::ClusterConfig;
use super::kmeans::kmeans;

const JACOBI_MAX_SWEEPS: usize = 100;
const JACOBI_TOLERANCE: f64 = 1e-18;

/// Assigns each affinity row to one of `k` clusters.
///
/// The affinity must be square and symmetric; negative entries are clamped
/// to zero before normalization.
pub fn spectral_cluster(affinity: &Array2<f64>, k: usize, config: &ClusterConfig) -> Vec<usize> {
    let n = affinity.nrows();
    if n == 0 {
        return Vec::new();
    }
    if k <= 1 {
        return vec![0; n];
    }
    if k >= n {
        return (0..n).collect();
    }

    let normalized = normalized_affinity(affinity);
    let embedding = spectral_embedding(&normalized, k);

    kmeans(
        &embedding,
        k,
        config.seed,
        config.kmeans_max_iter,
        config.kmeans_restarts,
    )
}

/// D^(-1/2) A D^(-1/2) with symmetrization and non-negativity applied
/// first. Isolated rows (zero degree) are left as zero.
fn normalized_affinity(affinity: &Array2<f64>) -> Array2<f64> {
    let n = affinity.nrows();
    let mut a = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            let value = 0.5 * (affinity[[i, j]] + affinity[[j, i]]);
            a[[i, j]] = value.max(0.0);
        }
    }

    let inv_sqrt_degree: Vec<f64> = (0..n)
        .map(|i| {
            let degree: f64 = a.row(i).sum();
            if degree > 0.0 {
                1.0 / degree.sqrt()
            } else {
                0.0
            }
        })
        .collect();

    for i in 0..n {
        for j in 0..n {
            a[[i, j]] *= inv_sqrt_degree[i] * inv_sqrt_degree[j];
        }
    }

    a
}

/// Rows of the k leading eigenvectors, each row scaled to unit length.
fn spectral_embedding(normalized: &Array2<f64>, k: usize) -> Array2<f64> {
    let n = normalized.nrows();
    let (eigenvalues, eigenvectors) = jacobi_eigen(normalized);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut embedding = Array2::zeros((n, k));
    for (col, &idx) in order.iter().take(k).enumerate() {
        for row in 0..n {
            embedding[[row, col]] = eigenvectors[[row, idx]];
        }
    }

    for mut row in embedding.rows_mut() {
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    embedding
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns eigenvalues and a matrix whose columns are the matching
/// eigenvectors. Sweeps stop once the off-diagonal mass drops below
/// tolerance.
fn jacobi_eigen(matrix: &Array2<f64>) -> (Vec<f64>, Array2<f64>) {
    let n = matrix.nrows();
    let mut a = matrix.clone();
    let mut v: Array2<f64> = Array2::eye(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = {
            let mut sum = 0.0;
            for p in 0..n {
                for q in (p + 1)..n {
                    sum += a[[p, q]] * a[[p, q]];
                }
            }
            sum
        };
        if off < JACOBI_TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq.abs() < JACOBI_TOLERANCE {
                    continue;
                }

                let app = a[[p, p]];
                let aqq = a[[q, q]];
                let tau = (aqq - app) / (2.0 * apq);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    -1.0 / (-tau + (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                a[[p, p]] = app - t * apq;
                a[[q, q]] = aqq + t * apq;
                a[[p, q]] = 0.0;
                a[[q, p]] = 0.0;

                for i in 0..n {
                    if i == p || i == q {
                        continue;
                    }
                    let aip = a[[i, p]];
                    let aiq = a[[i, q]];
                    a[[i, p]] = c * aip - s * aiq;
                    a[[p, i]] = a[[i, p]];
                    a[[i, q]] = s * aip + c * aiq;
                    a[[q, i]] = a[[i, q]];
                }

                for i in 0..n {
                    let vip = v[[i, p]];
                    let viq = v[[i, q]];
                    v[[i, p]] = c * vip - s * viq;
                    v[[i, q]] = s * vip + c * viq;
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| a[[i, i]]).collect();
    (eigenvalues, v)
}
