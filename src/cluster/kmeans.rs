//! Seeded k-means over spectral embedding rows.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Outcome of one k-means run.
struct KMeansRun {
    labels: Vec<usize>,
    inertia: f64,
}

/// Clusters the rows of `data` into `k` groups.
///
/// k-means++ initialization with a seeded RNG; `restarts` independent runs
/// share the RNG stream and the lowest-inertia run wins, so results are
/// reproducible for a given seed.
pub fn kmeans(
    data: &Array2<f64>,
    k: usize,
    seed: u64,
    max_iter: usize,
    restarts: usize,
) -> Vec<usize> {
    let n = data.nrows();
    if n == 0 || k == 0 {
        return Vec::new();
    }
    if k >= n {
        return (0..n).collect();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut best: Option<KMeansRun> = None;

    for _ in 0..restarts.max(1) {
        let run = run_once(data, k, max_iter, &mut rng);
        let better = best
            .as_ref()
            .map(|b| run.inertia < b.inertia)
            .unwrap_or(true);
        if better {
            best = Some(run);
        }
    }

    best.map(|b| b.labels).unwrap_or_default()
}

fn run_once(data: &Array2<f64>, k: usize, max_iter: usize, rng: &mut StdRng) -> KMeansRun {
    let n = data.nrows();
    let dim = data.ncols();

    let mut centroids = init_plus_plus(data, k, rng);
    let mut labels = vec![0usize; n];

    for _ in 0..max_iter {
        let mut changed = false;
        for i in 0..n {
            let label = nearest_centroid(data.row(i), &centroids);
            if label != labels[i] {
                labels[i] = label;
                changed = true;
            }
        }

        // Recompute centroids; an emptied cluster takes the point farthest
        // from its current centroid.
        let mut sums = Array2::zeros((k, dim));
        let mut counts = vec![0usize; k];
        for i in 0..n {
            let mut row = sums.row_mut(labels[i]);
            row += &data.row(i);
            counts[labels[i]] += 1;
        }
        for c in 0..k {
            if counts[c] == 0 {
                let far = farthest_point(data, &labels, &centroids);
                labels[far] = c;
                centroids.row_mut(c).assign(&data.row(far));
                changed = true;
            } else {
                let mean = sums.row(c).mapv(|v| v / counts[c] as f64);
                centroids.row_mut(c).assign(&mean);
            }
        }

        if !changed {
            break;
        }
    }

    let inertia = (0..n)
        .map(|i| squared_distance(data.row(i), centroids.row(labels[i])))
        .sum();

    KMeansRun { labels, inertia }
}

/// k-means++ seeding: first centroid uniform, each subsequent centroid
/// sampled proportionally to squared distance from the nearest chosen one.
fn init_plus_plus(data: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = data.nrows();
    let dim = data.ncols();
    let mut centroids = Array2::zeros((k, dim));

    let first = rng.gen_range(0..n);
    centroids.row_mut(0).assign(&data.row(first));

    let mut min_dist: Vec<f64> = (0..n)
        .map(|i| squared_distance(data.row(i), centroids.row(0)))
        .collect();

    for c in 1..k {
        let total: f64 = min_dist.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = n - 1;
            for (i, d) in min_dist.iter().enumerate() {
                target -= d;
                if target <= 0.0 {
                    chosen = i;
                    break;
                }
            }
            chosen
        } else {
            rng.gen_range(0..n)
        };

        centroids.row_mut(c).assign(&data.row(next));
        for i in 0..n {
            let d = squared_distance(data.row(i), centroids.row(c));
            if d < min_dist[i] {
                min_dist[i] = d;
            }
        }
    }

    centroids
}

fn nearest_centroid(point: ArrayView1<f64>, centroids: &Array2<f64>) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.rows().into_iter().enumerate() {
        let dist = squared_distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

fn farthest_point(data: &Array2<f64>, labels: &[usize], centroids: &Array2<f64>) -> usize {
    let mut far = 0;
    let mut far_dist = -1.0;
    for i in 0..data.nrows() {
        let dist = squared_distance(data.row(i), centroids.row(labels[i]));
        if dist > far_dist {
            far_dist = dist;
            far = i;
        }
    }
    far
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn two_blobs() -> Array2<f64> {
        arr2(&[
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [5.0, 5.0],
            [5.1, 5.0],
            [5.0, 5.1],
        ])
    }

    #[test]
    fn test_separates_two_blobs() {
        let labels = kmeans(&two_blobs(), 2, 42, 300, 10);

        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[3], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let data = two_blobs();
        let a = kmeans(&data, 2, 42, 300, 10);
        let b = kmeans(&data, 2, 42, 300, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_equal_to_n() {
        let data = arr2(&[[0.0, 0.0], [1.0, 1.0]]);
        let labels = kmeans(&data, 2, 42, 300, 10);
        assert_eq!(labels.len(), 2);
        assert_ne!(labels[0], labels[1]);
    }

    #[test]
    fn test_empty_input() {
        let data = Array2::<f64>::zeros((0, 2));
        assert!(kmeans(&data, 2, 42, 300, 10).is_empty());
    }

    #[test]
    fn test_all_clusters_populated() {
        let labels = kmeans(&two_blobs(), 3, 42, 300, 10);
        let mut seen = std::collections::HashSet::new();
        seen.extend(labels.iter().copied());
        assert_eq!(seen.len(), 3);
    }
}
