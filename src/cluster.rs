//! Spatial clustering of street segments into per-agent groups.
//!
//! Runs seeded k-means over segment centroids in raw lat/lon space. The
//! flat-coordinate approximation is acceptable at city/province scale; a
//! projected coordinate system could replace it without changing the
//! partition contract.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use crate::segment::Segment;

/// Per-agent segment groups, keyed by 0-based agent index.
pub type Assignments = BTreeMap<usize, Vec<Segment>>;

/// Partition segments into `num_agents` spatially coherent groups.
///
/// Segments without geometry are excluded from the clustering input and never
/// appear in any group. Every agent index `0..num_agents` is present as a key
/// even when its group is empty; a run with zero usable segments (or zero
/// agents) returns an empty map instead.
///
/// The partition is deterministic: the same segments, agent count and seed
/// always produce the same grouping.
pub fn assign(
    segments: &[Segment],
    num_agents: usize,
    seed: u64,
    restarts: usize,
    max_iterations: usize,
) -> Assignments {
    let mut points = Vec::new();
    let mut indices = Vec::new();

    for (idx, segment) in segments.iter().enumerate() {
        if let Some(centroid) = segment.centroid() {
            points.push(centroid);
            indices.push(idx);
        }
    }

    if points.is_empty() || num_agents == 0 {
        return Assignments::new();
    }

    let labels = kmeans(&points, num_agents, seed, restarts, max_iterations);

    let mut assignments: Assignments = (0..num_agents).map(|i| (i, Vec::new())).collect();
    for (label, &idx) in labels.iter().zip(&indices) {
        assignments
            .entry(*label)
            .or_default()
            .push(segments[idx].clone());
    }

    debug!(
        "clustered {} segments into {} groups (sizes: {:?})",
        points.len(),
        num_agents,
        assignments.values().map(Vec::len).collect::<Vec<_>>()
    );

    assignments
}

/// Seeded k-means over 2D points: k-means++ initialization, Lloyd iterations,
/// `restarts` independent runs keeping the labeling with the lowest inertia.
fn kmeans(points: &[(f64, f64)], k: usize, seed: u64, restarts: usize, max_iterations: usize) -> Vec<usize> {
    // With at least as many clusters as points every point gets its own
    // label and the surplus clusters stay empty.
    if k >= points.len() {
        return (0..points.len()).collect();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut best_labels: Option<Vec<usize>> = None;
    let mut best_inertia = f64::INFINITY;

    for _ in 0..restarts.max(1) {
        let (labels, inertia) = lloyd_run(points, k, &mut rng, max_iterations);
        if inertia < best_inertia {
            best_inertia = inertia;
            best_labels = Some(labels);
        }
    }

    best_labels.unwrap_or_else(|| vec![0; points.len()])
}

/// One k-means run; returns the final labels and their inertia.
fn lloyd_run(
    points: &[(f64, f64)],
    k: usize,
    rng: &mut ChaCha8Rng,
    max_iterations: usize,
) -> (Vec<usize>, f64) {
    let mut centers = init_plus_plus(points, k, rng);
    let mut labels = vec![0usize; points.len()];

    for _ in 0..max_iterations.max(1) {
        let mut changed = false;

        for (i, point) in points.iter().enumerate() {
            let nearest = nearest_center(*point, &centers);
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        let mut sums = vec![(0.0, 0.0); k];
        let mut counts = vec![0usize; k];
        for (i, point) in points.iter().enumerate() {
            let label = labels[i];
            sums[label].0 += point.0;
            sums[label].1 += point.1;
            counts[label] += 1;
        }
        for j in 0..k {
            // Empty clusters keep their previous center.
            if counts[j] > 0 {
                centers[j] = (sums[j].0 / counts[j] as f64, sums[j].1 / counts[j] as f64);
            }
        }
    }

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(p, &l)| squared_distance(*p, centers[l]))
        .sum();

    (labels, inertia)
}

/// k-means++ seeding: spread the initial centers out by sampling each next
/// center with probability proportional to its squared distance from the
/// nearest already-chosen center.
fn init_plus_plus(points: &[(f64, f64)], k: usize, rng: &mut ChaCha8Rng) -> Vec<(f64, f64)> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.gen_range(0..points.len())]);

    while centers.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                centers
                    .iter()
                    .map(|c| squared_distance(*p, *c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // All remaining points coincide with a chosen center.
            centers.push(points[rng.gen_range(0..points.len())]);
            continue;
        }

        let mut target = rng.gen::<f64>() * total;
        let mut chosen = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            target -= w;
            if target <= 0.0 {
                chosen = i;
                break;
            }
        }
        centers.push(points[chosen]);
    }

    centers
}

fn nearest_center(point: (f64, f64), centers: &[(f64, f64)]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, center) in centers.iter().enumerate() {
        let dist = squared_distance(point, *center);
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}

fn squared_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)
}
