//! Cluster-count search.
//!
//! Candidate counts from 2 up to n/3, each scored by the Calinski-Harabasz
//! index of a trial clustering, with a reward for finer partitions and an
//! early stop after a run of consecutive score drops.

use ndarray::Array2;
use tracing::debug;

use crate::error::{AtlasError, AtlasResult};

use super::config::ClusterConfig;
use super::spectral::spectral_cluster;

/// Minimum node count for a meaningful search (n/3 must reach 2).
pub const MIN_NODES: usize = 6;

/// Picks the cluster count for `fused` by trial clustering.
///
/// Each candidate k is clustered on the fused matrix but scored against the
/// raw similarity rows, so the quality measure is not biased by the fusion
/// weights. The reported k maximizes score * k^k_reward; the raw score
/// drives the early stop.
pub fn choose_cluster_count(
    fused: &Array2<f64>,
    similarity: &Array2<f64>,
    config: &ClusterConfig,
) -> AtlasResult<usize> {
    let n = fused.nrows();
    let max_k = n / 3;
    if max_k < 2 {
        return Err(AtlasError::InsufficientNodes {
            got: n,
            need: MIN_NODES,
        });
    }

    let mut best_k = 2;
    let mut best_scaled = f64::NEG_INFINITY;
    let mut last_score = f64::NEG_INFINITY;
    let mut decreasing_streak = 0usize;

    for k in 2..=max_k {
        let labels = spectral_cluster(fused, k, config);
        let score = calinski_harabasz(similarity, &labels);
        let scaled = score * (k as f64).powf(config.k_reward);

        debug!(k, score, scaled, "cluster count candidate");

        if scaled > best_scaled {
            best_scaled = scaled;
            best_k = k;
        }

        if score < last_score {
            decreasing_streak += 1;
            if decreasing_streak > config.patience {
                debug!(k, "stopping cluster count search early");
                break;
            }
        } else {
            decreasing_streak = 0;
        }
        last_score = score;
    }

    Ok(best_k)
}

/// Calinski-Harabasz index of `labels` over the rows of `features`.
///
/// Ratio of between-cluster to within-cluster dispersion, scaled by
/// (n - k) / (k - 1). Returns 1.0 when the within-cluster dispersion is
/// zero, and 0.0 for degenerate label sets.
pub fn calinski_harabasz(features: &Array2<f64>, labels: &[usize]) -> f64 {
    let n = features.nrows();
    let dim = features.ncols();
    if n == 0 || labels.len() != n {
        return 0.0;
    }

    let k = match labels.iter().max() {
        Some(&max) => max + 1,
        None => return 0.0,
    };
    if k < 2 || k >= n {
        return 0.0;
    }

    let overall_mean: Vec<f64> = (0..dim)
        .map(|d| features.column(d).sum() / n as f64)
        .collect();

    let mut cluster_sums = vec![vec![0.0; dim]; k];
    let mut cluster_counts = vec![0usize; k];
    for (i, &label) in labels.iter().enumerate() {
        cluster_counts[label] += 1;
        for d in 0..dim {
            cluster_sums[label][d] += features[[i, d]];
        }
    }

    let mut between = 0.0;
    let mut within = 0.0;
    for c in 0..k {
        if cluster_counts[c] == 0 {
            continue;
        }
        let count = cluster_counts[c] as f64;
        let mean: Vec<f64> = cluster_sums[c].iter().map(|s| s / count).collect();

        between += count
            * mean
                .iter()
                .zip(&overall_mean)
                .map(|(m, o)| (m - o) * (m - o))
                .sum::<f64>();

        for (i, &label) in labels.iter().enumerate() {
            if label != c {
                continue;
            }
            within += (0..dim)
                .map(|d| {
                    let diff = features[[i, d]] - mean[d];
                    diff * diff
                })
                .sum::<f64>();
        }
    }

    if within <= f64::EPSILON {
        return 1.0;
    }

    (between / within) * ((n - k) as f64 / (k - 1) as f64)
}
