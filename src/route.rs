//! Greedy nearest-neighbor sequencing of one agent's segments.

use log::debug;
use std::cmp::Ordering;

use crate::geo::haversine_km;
use crate::segment::Segment;

/// Reorder a group of segments into a visit-order chain.
///
/// Starts from the first segment in input order and repeatedly appends the
/// remaining segment whose centroid is nearest (great-circle distance) to the
/// centroid of the last segment placed; ties go to the first candidate
/// encountered. The output is a permutation of the input.
///
/// This is a greedy path heuristic, not a shortest-tour solver: each step is
/// locally minimal but the overall tour carries no optimality guarantee.
///
/// A segment without geometry should never reach this point, but if the
/// chain ends on one the walk has no anchor to continue from; sequencing
/// stops there and the unplaced remainder is dropped.
pub fn sequence(mut segments: Vec<Segment>) -> Vec<Segment> {
    if segments.len() < 2 {
        return segments;
    }

    let mut ordered = Vec::with_capacity(segments.len());
    ordered.push(segments.remove(0));

    while !segments.is_empty() {
        let last_centroid = match ordered.last().and_then(Segment::centroid) {
            Some(centroid) => centroid,
            None => {
                debug!(
                    "sequencing halted on a segment without geometry; dropping {} segments",
                    segments.len()
                );
                break;
            }
        };

        let nearest = segments
            .iter()
            .enumerate()
            .filter_map(|(i, candidate)| {
                let centroid = candidate.centroid()?;
                Some((i, haversine_km(last_centroid, centroid)))
            })
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i);

        match nearest {
            Some(i) => ordered.push(segments.remove(i)),
            None => break,
        }
    }

    ordered
}
