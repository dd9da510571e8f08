// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stitching: pairing the half-edges of a polygon soup into meshes.
//!
//! Runs in four phases over the half-edges that are still open:
//!
//! 1. Directed edges with exactly one half-edge each way pair directly.
//! 2. Face groups that have a truly unmatched edge are stripped from the
//!    ambiguous ("complex") buckets, which may make more of them pairable.
//! 3. The remaining complex edges are chained into paths.
//! 4. Along each path, parallel half-edge bundles are ordered by angle
//!    around the edge and fused forward-to-reverse.
//!
//! Only the `rev` links of the soup change.

mod angular;
mod bundles;
mod edge_graph;
mod edge_index;
mod open_regions;
mod simple;
mod union_find;

#[cfg(test)]
pub(crate) mod fixtures;

pub use edge_index::{VertexPair, VertexPairIndex};
pub use union_find::FaceGroups;

use crate::config::StitchOptions;
use crate::mesh::{FaceId, HalfEdgeSoup};
use edge_graph::ComplexEdgeGraph;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Counters from one stitching run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchStats {
    pub half_edges: usize,
    /// Half-edges that were already paired before the run
    pub already_paired: usize,
    pub simple_pairs: usize,
    pub open_region_pairs: usize,
    pub open_region_iterations: usize,
    /// Directed complex buckets left for angular matching
    pub complex_edges: usize,
    pub paths: usize,
    pub bundle_runs: usize,
    pub angular_pairs: usize,
    /// Half-edges still without a reverse afterwards
    pub open_half_edges: usize,
}

impl StitchStats {
    pub fn total_pairs(&self) -> usize {
        self.simple_pairs + self.open_region_pairs + self.angular_pairs
    }
}

/// Face grouping produced by [`stitch`]
#[derive(Debug, Clone)]
pub struct StitchOutcome {
    /// Dense group index of every face, numbered in order of first face
    pub face_group: Vec<usize>,
    pub group_sizes: Vec<usize>,
    pub stats: StitchStats,
}

impl StitchOutcome {
    pub fn group_count(&self) -> usize {
        self.group_sizes.len()
    }

    pub fn group_of(&self, f: FaceId) -> usize {
        self.face_group[f.0]
    }
}

/// Pair every open half-edge of `soup` that can be paired and group the
/// faces by connectivity.
///
/// Half-edges that are already paired keep their reverse. Running this
/// again on its own output changes nothing.
pub fn stitch(soup: &mut HalfEdgeSoup, options: &StitchOptions) -> StitchOutcome {
    let mut groups = FaceGroups::new(soup.face_count());
    let mut stats = StitchStats {
        half_edges: soup.half_edge_count(),
        ..Default::default()
    };

    for e in soup.half_edge_ids() {
        if let Some(rev) = soup.rev(e) {
            stats.already_paired += 1;
            groups.union(soup.face_of(e).0, soup.face_of(rev).0);
        }
    }

    let edges = VertexPairIndex::from_open_half_edges(soup);
    let simple::SimpleMatch {
        mut complex,
        open_faces,
        paired,
    } = simple::match_simple_edges(soup, &edges, &mut groups);
    stats.simple_pairs = paired;
    debug!(
        pairs = paired,
        complex = complex.len(),
        open_faces = open_faces.len(),
        "Simple edge matching done"
    );

    if !complex.is_empty() {
        let resolved = open_regions::resolve_open_regions(soup, &mut complex, &mut groups, &open_faces);
        stats.open_region_pairs = resolved.paired;
        stats.open_region_iterations = resolved.iterations;
        debug!(
            pairs = resolved.paired,
            iterations = resolved.iterations,
            remaining = complex.len(),
            "Open regions resolved"
        );
    }

    stats.complex_edges = complex.len();
    if !complex.is_empty() {
        let paths = ComplexEdgeGraph::build(&complex).into_paths(soup, &complex);
        stats.paths = paths.len();

        for path in &paths {
            let mut i = 0;
            while i + 1 < path.len() {
                let bundles = bundles::extract_bundles(soup, &complex, &path[i..]);
                let mut orderings = angular::order_bundles(soup, &mut groups, &bundles, options.avoid_cavities);
                stats.angular_pairs += angular::match_ordered(soup, &mut groups, &mut orderings);
                stats.bundle_runs += 1;
                i += bundles.run_len();
            }
        }
        debug!(
            paths = stats.paths,
            runs = stats.bundle_runs,
            pairs = stats.angular_pairs,
            avoid_cavities = options.avoid_cavities,
            "Complex edges matched"
        );
    }

    stats.open_half_edges = soup.half_edge_ids().filter(|&e| soup.rev(e).is_none()).count();
    let (face_group, group_sizes) = groups.collapse();
    debug!(
        groups = group_sizes.len(),
        open = stats.open_half_edges,
        "Stitching finished"
    );

    StitchOutcome {
        face_group,
        group_sizes,
        stats,
    }
}
