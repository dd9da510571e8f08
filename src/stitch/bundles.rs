// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel half-edge chains along a complex path

use super::edge_index::VertexPairIndex;
use crate::mesh::{HalfEdgeId, HalfEdgeSoup, VertexId};

/// Forward and reverse bundles over one common sub-run of a path.
///
/// `fwd[j][i]` runs `path[i] -> path[i + 1]`, `rev[j][i]` the other way.
/// Every bundle has the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bundles {
    pub fwd: Vec<Vec<HalfEdgeId>>,
    pub rev: Vec<Vec<HalfEdgeId>>,
}

impl Bundles {
    /// Number of path edges the bundles cover
    pub fn run_len(&self) -> usize {
        self.fwd[0].len()
    }
}

/// Follow every half-edge on the first edge of `path` for as long as the
/// bucket arity matches and each chain stays inside its own face loops
pub(crate) fn extract_bundles(soup: &HalfEdgeSoup, complex: &VertexPairIndex, path: &[VertexId]) -> Bundles {
    assert!(path.len() >= 2, "a path has at least one edge");
    let (a, b) = (path[0], path[1]);
    let start_fwd = complex.get(&(a, b)).unwrap_or_default();
    let start_rev = complex.get(&(b, a)).unwrap_or_default();
    assert!(
        !start_fwd.is_empty() && !start_rev.is_empty(),
        "complex edge {:?} -> {:?} has an empty direction",
        a,
        b
    );

    let mut fwd: Vec<Vec<HalfEdgeId>> = start_fwd.iter().map(|&e| vec![e]).collect();
    let mut rev: Vec<Vec<HalfEdgeId>> = start_rev.iter().map(|&e| vec![e]).collect();

    for step in path[1..].windows(2) {
        let (a, b) = (step[0], step[1]);
        if complex.bucket_len(&(a, b)) != fwd.len() || complex.bucket_len(&(b, a)) != rev.len() {
            break;
        }
        let Some(next_fwd) = fwd
            .iter()
            .map(|chain| chain.last().and_then(|&e| soup.perim_next(e)).filter(|&n| soup.v2(n) == b))
            .collect::<Option<Vec<_>>>()
        else {
            break;
        };
        let Some(next_rev) = rev
            .iter()
            .map(|chain| chain.last().and_then(|&e| soup.perim_prev(e)).filter(|&p| soup.v1(p) == b))
            .collect::<Option<Vec<_>>>()
        else {
            break;
        };
        for (chain, e) in fwd.iter_mut().zip(next_fwd) {
            chain.push(e);
        }
        for (chain, e) in rev.iter_mut().zip(next_rev) {
            chain.push(e);
        }
    }

    Bundles { fwd, rev }
}
