// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Undirected graph over the vertices of unresolved edges

use super::edge_index::{reversed, VertexPairIndex};
use crate::mesh::{HalfEdgeId, HalfEdgeSoup, VertexId};
use std::collections::{BTreeMap, BTreeSet};

/// Adjacency of every vertex still touched by a complex edge
#[derive(Debug, Clone, Default)]
pub(crate) struct ComplexEdgeGraph {
    adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
}

impl ComplexEdgeGraph {
    /// Panics if a complex bucket has no reverse bucket
    pub fn build(complex: &VertexPairIndex) -> Self {
        let mut adjacency: BTreeMap<VertexId, BTreeSet<VertexId>> = BTreeMap::new();
        for (a, b) in complex.sorted_pairs() {
            assert!(
                complex.contains(&reversed((a, b))),
                "every complex edge has a mate: {:?} -> {:?} has none",
                a,
                b
            );
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        Self { adjacency }
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency.get(&v).map_or(0, BTreeSet::len)
    }

    /// The neighbour of degree-2 vertex `v` that is not `from`
    fn other_neighbour(&self, v: VertexId, from: VertexId) -> Option<VertexId> {
        self.adjacency.get(&v)?.iter().copied().find(|&n| n != from)
    }

    /// Take every chain out of the graph, in extraction order
    pub fn into_paths(mut self, soup: &HalfEdgeSoup, complex: &VertexPairIndex) -> Vec<Vec<VertexId>> {
        let mut paths = Vec::new();
        while !self.is_empty() {
            let Some(path) = self.extract_path(soup, complex) else {
                break;
            };
            self.remove_path(&path);
            paths.push(path);
        }
        paths
    }

    /// Longest chain through the lowest vertex whose half-edge rails stay
    /// consistent.
    ///
    /// The walk first backs up through degree-2 vertices to an end of the
    /// chain, or all the way round a loop, then runs forward.
    pub fn extract_path(&self, soup: &HalfEdgeSoup, complex: &VertexPairIndex) -> Option<Vec<VertexId>> {
        let (&init, neighbours) = self.adjacency.iter().next()?;
        let mut vert = init;
        let mut next = *neighbours.iter().next()?;

        while self.degree(vert) == 2 {
            let Some(prev) = self.other_neighbour(vert, next) else {
                break;
            };
            next = vert;
            vert = prev;
            if vert == init {
                break;
            }
        }

        let start = vert;
        let mut path = vec![start];
        let mut fwd: Vec<HalfEdgeId> = complex.get(&(vert, next)).unwrap_or_default().to_vec();
        let mut rev: Vec<HalfEdgeId> = complex.get(&(next, vert)).unwrap_or_default().to_vec();

        loop {
            path.push(next);
            if next == start || self.degree(next) != 2 {
                break;
            }
            let Some(after) = self.other_neighbour(next, vert) else {
                break;
            };
            match advance_rails(soup, complex, &fwd, &rev, next, after) {
                Some((f, r)) => {
                    fwd = f;
                    rev = r;
                }
                None => break,
            }
            vert = next;
            next = after;
        }

        Some(path)
    }

    /// Drop the interior vertices of `path` and the edges at its two ends
    pub fn remove_path(&mut self, path: &[VertexId]) {
        let n = path.len();
        if n < 2 {
            return;
        }
        for v in &path[1..n - 1] {
            self.adjacency.remove(v);
        }
        self.detach(path[0], path[1]);
        self.detach(path[n - 1], path[n - 2]);
    }

    fn detach(&mut self, v: VertexId, neighbour: VertexId) {
        if let Some(neighbours) = self.adjacency.get_mut(&v) {
            neighbours.remove(&neighbour);
            if neighbours.is_empty() {
                self.adjacency.remove(&v);
            }
        }
    }
}

/// Step every rail one edge further, onto `at -> to`.
///
/// Forward rails continue through `perim_next`, reverse rails through
/// `perim_prev`; `None` when the arity or any rail disagrees.
fn advance_rails(
    soup: &HalfEdgeSoup,
    complex: &VertexPairIndex,
    fwd: &[HalfEdgeId],
    rev: &[HalfEdgeId],
    at: VertexId,
    to: VertexId,
) -> Option<(Vec<HalfEdgeId>, Vec<HalfEdgeId>)> {
    if complex.bucket_len(&(at, to)) != fwd.len() || complex.bucket_len(&(to, at)) != rev.len() {
        return None;
    }
    let next_fwd = fwd
        .iter()
        .map(|&e| soup.perim_next(e).filter(|&n| soup.v2(n) == to))
        .collect::<Option<Vec<_>>>()?;
    let next_rev = rev
        .iter()
        .map(|&e| soup.perim_prev(e).filter(|&p| soup.v1(p) == to))
        .collect::<Option<Vec<_>>>()?;
    Some((next_fwd, next_rev))
}
