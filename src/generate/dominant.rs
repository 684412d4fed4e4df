//! Dominant colours by k-means clustering, bounded by a deadline.

use std::collections::BTreeSet;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;

use super::generate_from;
use crate::types::{Colour, ColourList};

/// How long clustering may run before the fallback palette is used.
pub const DEFAULT_CLUSTER_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_ITERATIONS: usize = 100;

type Point = [f64; 3];

/// Reasons clustering gave up. Always recovered from, never surfaced.
#[derive(Debug, Error)]
enum ClusterFailure {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("only {distinct} distinct colours for {k} clusters")]
    TooFewColours { distinct: usize, k: usize },

    #[error("worker exited without a result")]
    WorkerLost,

    #[error("failed to spawn worker: {0}")]
    Spawn(std::io::Error),
}

/// Cluster `colours` into `k` groups and return the centroid of each.
///
/// Clustering runs on a worker thread. If it does not answer within
/// `timeout`, or cannot cluster at all, the worker is abandoned and the
/// result of [`generate_from`] is returned instead.
pub fn dominant(
    colours: &[Colour],
    k: usize,
    timeout: Duration,
    rng: &mut dyn RngCore,
) -> ColourList {
    if k == 0 {
        return Vec::new();
    }

    match spawn_kmeans(colours, k, timeout, rng.gen()) {
        Ok(centroids) => centroids,
        Err(reason) => {
            tracing::warn!(%reason, k, "clustering unavailable, generating palette instead");
            generate_from(colours, k, true, rng)
        }
    }
}

fn spawn_kmeans(
    colours: &[Colour],
    k: usize,
    timeout: Duration,
    seed: u64,
) -> Result<ColourList, ClusterFailure> {
    let samples = colours.to_vec();
    let (tx, rx) = mpsc::channel();

    // the handle is dropped on return, detaching a worker that missed the deadline
    let _worker = thread::Builder::new()
        .name("recolour-kmeans".to_string())
        .spawn(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            let _ = tx.send(kmeans(&samples, k, &mut rng));
        })
        .map_err(ClusterFailure::Spawn)?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(ClusterFailure::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(ClusterFailure::WorkerLost),
    }
}

fn kmeans(samples: &[Colour], k: usize, rng: &mut StdRng) -> Result<ColourList, ClusterFailure> {
    let mut distinct: Vec<Colour> = samples
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if distinct.len() < k {
        return Err(ClusterFailure::TooFewColours {
            distinct: distinct.len(),
            k,
        });
    }

    let points: Vec<Point> = samples.iter().map(|c| to_point(*c)).collect();

    distinct.shuffle(rng);
    let mut centroids: Vec<Point> = distinct.iter().take(k).map(|c| to_point(*c)).collect();
    let mut assignments = vec![usize::MAX; points.len()];

    for _ in 0..MAX_ITERATIONS {
        if !assign_clusters(&points, &centroids, &mut assignments) {
            break;
        }
        centroids = update_centroids(&points, &assignments, k, rng);
    }

    Ok(centroids
        .into_iter()
        .map(|[r, g, b]| Colour::new(r as u8, g as u8, b as u8))
        .collect())
}

fn to_point(colour: Colour) -> Point {
    [colour.r as f64, colour.g as f64, colour.b as f64]
}

fn distance_squared(a: &Point, b: &Point) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Assign each point to its nearest centroid. Returns true if anything moved.
fn assign_clusters(points: &[Point], centroids: &[Point], assignments: &mut [usize]) -> bool {
    let mut changed = false;

    for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, centroid) in centroids.iter().enumerate() {
            let d = distance_squared(point, centroid);
            if d < best_distance {
                best_distance = d;
                best = i;
            }
        }
        if *assignment != best {
            *assignment = best;
            changed = true;
        }
    }

    changed
}

fn update_centroids(
    points: &[Point],
    assignments: &[usize],
    k: usize,
    rng: &mut StdRng,
) -> Vec<Point> {
    let mut sums = vec![[0.0; 3]; k];
    let mut counts = vec![0usize; k];

    for (point, &cluster) in points.iter().zip(assignments) {
        for channel in 0..3 {
            sums[cluster][channel] += point[channel];
        }
        counts[cluster] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| {
            if count == 0 {
                // reseed an empty cluster from a random sample
                points.choose(rng).copied().unwrap_or_default()
            } else {
                sum.map(|s| s / count as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_two_clear_clusters() {
        let colours = vec![
            Colour::new(250, 0, 0),
            Colour::new(254, 4, 0),
            Colour::new(246, 2, 2),
            Colour::new(0, 0, 250),
            Colour::new(2, 2, 254),
            Colour::new(4, 0, 246),
        ];

        let mut result = dominant(&colours, 2, DEFAULT_CLUSTER_TIMEOUT, &mut rng());
        result.sort();

        assert_eq!(result, vec![Colour::new(2, 0, 250), Colour::new(250, 2, 0)]);
    }

    #[test]
    fn test_zero_clusters() {
        let colours = vec![Colour::WHITE, Colour::BLACK];
        assert!(dominant(&colours, 0, DEFAULT_CLUSTER_TIMEOUT, &mut rng()).is_empty());
    }

    #[test]
    fn test_too_few_colours_falls_back() {
        let colours = vec![Colour::WHITE, Colour::BLACK];
        let result = dominant(&colours, 5, DEFAULT_CLUSTER_TIMEOUT, &mut rng());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_deadline_never_blocks() {
        let colours: ColourList = (0..=255u8).map(|i| Colour::new(i, 255 - i, i / 2)).collect();
        let result = dominant(&colours, 8, Duration::ZERO, &mut rng());
        assert_eq!(result.len(), 8);
    }

    #[test]
    fn test_kmeans_centroids_are_truncated_means() {
        let colours = vec![Colour::new(0, 0, 0), Colour::new(1, 1, 1)];
        let result = kmeans(&colours, 1, &mut rng()).unwrap();
        assert_eq!(result, vec![Colour::new(0, 0, 0)]);
    }
}
