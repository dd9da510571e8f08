// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Directed vertex-pair buckets of half-edges

use crate::mesh::{HalfEdgeId, HalfEdgeSoup, VertexId};
use ahash::AHashMap;

/// Ordered (tail, head) vertex pair
pub type VertexPair = (VertexId, VertexId);

/// The same pair traversed the other way
pub fn reversed(pair: VertexPair) -> VertexPair {
    (pair.1, pair.0)
}

/// Maps each directed vertex pair to the half-edges running along it,
/// in insertion order
#[derive(Debug, Clone, Default)]
pub struct VertexPairIndex {
    buckets: AHashMap<VertexPair, Vec<HalfEdgeId>>,
}

impl VertexPairIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every half-edge of `soup` that has no reverse yet
    pub fn from_open_half_edges(soup: &HalfEdgeSoup) -> Self {
        let mut index = Self::new();
        for e in soup.half_edge_ids() {
            if soup.rev(e).is_none() {
                index.insert((soup.v1(e), soup.v2(e)), e);
            }
        }
        index
    }

    pub fn insert(&mut self, pair: VertexPair, edge: HalfEdgeId) {
        self.buckets.entry(pair).or_default().push(edge);
    }

    /// Replace the whole bucket for `pair`
    pub fn insert_bucket(&mut self, pair: VertexPair, edges: Vec<HalfEdgeId>) {
        self.buckets.insert(pair, edges);
    }

    pub fn get(&self, pair: &VertexPair) -> Option<&[HalfEdgeId]> {
        self.buckets.get(pair).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, pair: &VertexPair) -> Option<&mut Vec<HalfEdgeId>> {
        self.buckets.get_mut(pair)
    }

    pub fn remove(&mut self, pair: &VertexPair) -> Option<Vec<HalfEdgeId>> {
        self.buckets.remove(pair)
    }

    pub fn contains(&self, pair: &VertexPair) -> bool {
        self.buckets.contains_key(pair)
    }

    /// Size of the bucket for `pair`, zero when absent
    pub fn bucket_len(&self, pair: &VertexPair) -> usize {
        self.buckets.get(pair).map_or(0, Vec::len)
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of indexed half-edges
    pub fn half_edge_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Bucket keys in ascending order, for deterministic traversal
    pub fn sorted_pairs(&self) -> Vec<VertexPair> {
        let mut pairs: Vec<VertexPair> = self.buckets.keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }
}
